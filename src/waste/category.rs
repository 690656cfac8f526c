use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Serialize, Serializer};

/// Coarse disposal class for a waste item.
///
/// `Unknown` is the sentinel for labels no classification group claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WasteCategory {
    Recyclables,
    Compostables,
    LandfillWaste,
    HazardousWaste,
    SpecialDisposal,
    Unknown,
}

impl WasteCategory {
    /// Every category, in declaration order, `Unknown` last.
    pub const ALL: [WasteCategory; 6] = [
        WasteCategory::Recyclables,
        WasteCategory::Compostables,
        WasteCategory::LandfillWaste,
        WasteCategory::HazardousWaste,
        WasteCategory::SpecialDisposal,
        WasteCategory::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Recyclables => "Recyclables",
            WasteCategory::Compostables => "Compostables",
            WasteCategory::LandfillWaste => "Landfill Waste",
            WasteCategory::HazardousWaste => "Hazardous Waste",
            WasteCategory::SpecialDisposal => "Special Disposal",
            WasteCategory::Unknown => "Unknown",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, WasteCategory::Unknown)
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        WasteCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| anyhow!("unknown waste category '{}'", s))
    }
}

impl Serialize for WasteCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
