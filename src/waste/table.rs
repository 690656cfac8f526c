use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::{anyhow, Result};

use super::category::WasteCategory;

/// Reference label groups, in resolution order.
const REFERENCE_GROUPS: &[(WasteCategory, &[&str])] = &[
    (
        WasteCategory::Recyclables,
        &[
            "brown-glass",
            "green-glass",
            "white-glass",
            "cardboard",
            "metal",
            "paper",
            "plastic",
        ],
    ),
    (WasteCategory::Compostables, &["biological"]),
    (WasteCategory::LandfillWaste, &["trash"]),
    (WasteCategory::HazardousWaste, &["battery"]),
    (WasteCategory::SpecialDisposal, &["clothes", "shoes"]),
];

/// Label -> category mapping.
///
/// Groups keep their declaration order. The inverted index is built once and
/// keeps the first group that lists a label, so a label listed twice resolves
/// the same way a front-to-back scan of the groups would.
#[derive(Clone, Debug)]
pub struct ClassificationTable {
    groups: Vec<(WasteCategory, Vec<String>)>,
    index: HashMap<String, WasteCategory>,
}

impl ClassificationTable {
    /// The shared reference table.
    pub fn reference() -> &'static ClassificationTable {
        static TABLE: OnceLock<ClassificationTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let groups = REFERENCE_GROUPS
                .iter()
                .map(|(category, labels)| {
                    (*category, labels.iter().map(|l| l.to_string()).collect())
                })
                .collect();
            Self::build(groups)
        })
    }

    /// Build a table from ordered groups.
    ///
    /// `Unknown` cannot own labels. Labels already claimed by an earlier group
    /// are kept but logged; they never change how the label resolves.
    pub fn from_groups<I, L>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (WasteCategory, L)>,
        L: IntoIterator,
        L::Item: Into<String>,
    {
        let mut collected: Vec<(WasteCategory, Vec<String>)> = Vec::new();
        for (category, labels) in groups {
            if category.is_unknown() {
                return Err(anyhow!(
                    "'{}' is reserved for unmatched labels and cannot own a group",
                    category
                ));
            }
            collected.push((category, labels.into_iter().map(Into::into).collect()));
        }
        Ok(Self::build(collected))
    }

    fn build(groups: Vec<(WasteCategory, Vec<String>)>) -> Self {
        let mut index = HashMap::new();
        for (category, labels) in &groups {
            for label in labels {
                match index.get(label) {
                    Some(existing) if existing != category => {
                        log::warn!(
                            "label '{}' listed under both {} and {}; keeping {}",
                            label,
                            existing,
                            category,
                            existing
                        );
                    }
                    Some(_) => {}
                    None => {
                        index.insert(label.clone(), *category);
                    }
                }
            }
        }
        Self { groups, index }
    }

    /// Resolve a label to its category. Exact, case-sensitive match.
    pub fn resolve(&self, label: &str) -> WasteCategory {
        self.index
            .get(label)
            .copied()
            .unwrap_or(WasteCategory::Unknown)
    }

    /// Ordered groups as declared.
    pub fn groups(&self) -> impl Iterator<Item = (WasteCategory, &[String])> {
        self.groups
            .iter()
            .map(|(category, labels)| (*category, labels.as_slice()))
    }

    /// Categories this table can produce for a known label.
    pub fn categories(&self) -> Vec<WasteCategory> {
        let mut out = Vec::new();
        for (category, labels) in &self.groups {
            if !labels.is_empty() && !out.contains(category) {
                out.push(*category);
            }
        }
        out
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|(_, labels)| labels.iter().map(String::as_str))
    }

    /// Copy of the groups with `extra` labels appended to each matching group.
    /// Categories with no existing group are appended at the end.
    pub fn extended<I>(&self, extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = (WasteCategory, Vec<String>)>,
    {
        let mut groups = self.groups.clone();
        for (category, labels) in extra {
            match groups.iter().position(|(existing, _)| *existing == category) {
                Some(idx) => groups[idx].1.extend(labels),
                None => groups.push((category, labels)),
            }
        }
        Self::from_groups(groups)
    }
}

/// Resolve a label against the reference table.
pub fn resolve_category(label: &str) -> WasteCategory {
    ClassificationTable::reference().resolve(label)
}
