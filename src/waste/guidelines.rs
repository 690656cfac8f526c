use std::collections::HashMap;
use std::sync::OnceLock;

use super::category::WasteCategory;

const REFERENCE_GUIDELINES: &[(WasteCategory, &str)] = &[
    (
        WasteCategory::Recyclables,
        "Please make sure the item is clean and dry before recycling.",
    ),
    (
        WasteCategory::Compostables,
        "Place in green bin for composting. No plastic bags allowed.",
    ),
    (
        WasteCategory::LandfillWaste,
        "Place in black bin for general waste.",
    ),
    (
        WasteCategory::HazardousWaste,
        "Do not place in regular bins! Take to a hazardous waste collection point.",
    ),
    (
        WasteCategory::SpecialDisposal,
        "Please take to a specialized collection point or donation center.",
    ),
    (
        WasteCategory::Unknown,
        "Please consult local waste management guidelines.",
    ),
];

/// Category -> user-facing disposal guideline.
#[derive(Clone, Debug, Default)]
pub struct GuidelineTable {
    entries: HashMap<WasteCategory, String>,
}

impl GuidelineTable {
    pub fn reference() -> &'static GuidelineTable {
        static TABLE: OnceLock<GuidelineTable> = OnceLock::new();
        TABLE.get_or_init(|| GuidelineTable::from_entries(REFERENCE_GUIDELINES.iter().copied()))
    }

    /// Build a table from explicit entries. Later entries replace earlier ones.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (WasteCategory, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(category, text)| (category, text.into()))
                .collect(),
        }
    }

    /// Guideline text, or `""` when the table has no entry for `category`.
    pub fn guideline_for(&self, category: WasteCategory) -> &str {
        self.entries
            .get(&category)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn contains(&self, category: WasteCategory) -> bool {
        self.entries.contains_key(&category)
    }

    pub fn set(&mut self, category: WasteCategory, text: impl Into<String>) {
        self.entries.insert(category, text.into());
    }
}
