use std::sync::OnceLock;

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::category::WasteCategory;
use super::guidelines::GuidelineTable;
use super::table::ClassificationTable;

/// Derived disposal fields for one predicted label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DisposalAdvice {
    pub waste_category: WasteCategory,
    pub disposal_message: String,
    pub disposal_guidelines: String,
}

/// Classification groups paired with their guideline text.
#[derive(Clone, Debug)]
pub struct WasteTaxonomy {
    classification: ClassificationTable,
    guidelines: GuidelineTable,
}

impl WasteTaxonomy {
    pub fn new(classification: ClassificationTable, guidelines: GuidelineTable) -> Self {
        Self {
            classification,
            guidelines,
        }
    }

    pub fn reference() -> &'static WasteTaxonomy {
        static TAXONOMY: OnceLock<WasteTaxonomy> = OnceLock::new();
        TAXONOMY.get_or_init(|| {
            WasteTaxonomy::new(
                ClassificationTable::reference().clone(),
                GuidelineTable::reference().clone(),
            )
        })
    }

    pub fn classification(&self) -> &ClassificationTable {
        &self.classification
    }

    pub fn guidelines(&self) -> &GuidelineTable {
        &self.guidelines
    }

    pub fn resolve(&self, label: &str) -> WasteCategory {
        self.classification.resolve(label)
    }

    /// Category, disposal message and guideline for `label`.
    ///
    /// A category without a guideline yields an empty guideline string.
    pub fn advise(&self, label: &str) -> DisposalAdvice {
        let waste_category = self.resolve(label);
        DisposalAdvice {
            waste_category,
            disposal_message: format!(
                "This item ({}) should be disposed of in the {} bin.",
                label, waste_category
            ),
            disposal_guidelines: self.guidelines.guideline_for(waste_category).to_string(),
        }
    }

    /// Every category the classification table can produce, plus `Unknown`,
    /// must have guideline text.
    pub fn check_consistency(&self) -> Result<()> {
        let missing: Vec<&str> = self
            .classification
            .categories()
            .into_iter()
            .chain(std::iter::once(WasteCategory::Unknown))
            .filter(|category| !self.guidelines.contains(*category))
            .map(|category| category.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(anyhow!(
                "guideline table has no entry for: {}",
                missing.join(", ")
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_taxonomy_is_consistent() {
        WasteTaxonomy::reference().check_consistency().unwrap();
    }

    #[test]
    fn missing_guideline_is_reported_and_degrades_to_empty() {
        let taxonomy = WasteTaxonomy::new(
            ClassificationTable::reference().clone(),
            GuidelineTable::from_entries([
                (WasteCategory::Recyclables, "rinse"),
                (WasteCategory::Unknown, "ask"),
            ]),
        );
        let err = taxonomy.check_consistency().unwrap_err().to_string();
        assert!(err.contains("Compostables"));
        assert!(err.contains("Special Disposal"));
        assert!(!err.contains("Recyclables"));

        let advice = taxonomy.advise("battery");
        assert_eq!(advice.waste_category, WasteCategory::HazardousWaste);
        assert_eq!(advice.disposal_guidelines, "");
    }

    #[test]
    fn advise_formats_message() {
        let advice = WasteTaxonomy::reference().advise("shoes");
        assert_eq!(
            advice.disposal_message,
            "This item (shoes) should be disposed of in the Special Disposal bin."
        );
    }
}
