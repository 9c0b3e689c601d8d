//! Utilization records and their classifications.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::error::ModelError;
use crate::record::MatchedRecord;
use crate::role::Role;

/// A matched record with per-vaccine utilization rates attached.
///
/// A vaccine missing either quantity column has no entry in `rates`;
/// "rate absent" and "rate = 0" are different things.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationRecord {
    pub record: MatchedRecord,
    pub rates: BTreeMap<String, f64>,
}

impl UtilizationRecord {
    pub fn rate(&self, vaccine: &str) -> Option<f64> {
        self.rates.get(vaccine).copied()
    }

    pub fn region(&self) -> String {
        self.record.text(columns::REGION_ADMIN)
    }

    pub fn zone(&self) -> String {
        self.record.text(columns::ZONE_ADMIN)
    }

    pub fn woreda(&self) -> String {
        self.record.text(columns::WOREDA_ADMIN)
    }

    pub fn period(&self) -> &str {
        &self.record.period
    }

    /// Quantity for a vaccine on one side; blank or non-numeric cells count as 0.
    pub fn quantity(&self, vaccine: &str, role: Role) -> Option<f64> {
        let column = columns::quantity_column(vaccine, role);
        self.record
            .get(&column)
            .map(|cell| cell.as_number().unwrap_or(0.0))
    }
}

/// Three-way utilization band plus the sentinel for unconfigured vaccines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UtilizationCategory {
    #[serde(rename = "Acceptable")]
    Acceptable,
    #[serde(rename = "Unacceptable")]
    Unacceptable,
    #[serde(rename = "Low Utilization")]
    LowUtilization,
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

impl UtilizationCategory {
    pub const ALL: [UtilizationCategory; 4] = [
        UtilizationCategory::Acceptable,
        UtilizationCategory::LowUtilization,
        UtilizationCategory::Unacceptable,
        UtilizationCategory::NotApplicable,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Acceptable => "Acceptable",
            Self::Unacceptable => "Unacceptable",
            Self::LowUtilization => "Low Utilization",
            Self::NotApplicable => "Not Applicable",
        }
    }
}

impl fmt::Display for UtilizationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UtilizationCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}

/// Position of a rate relative to the wide high/low extremity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Extremity {
    #[serde(rename = "High Extreme")]
    High,
    #[serde(rename = "Low Extreme")]
    Low,
    #[serde(rename = "Within Range")]
    Within,
}

impl Extremity {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High Extreme",
            Self::Low => "Low Extreme",
            Self::Within => "Within Range",
        }
    }
}

impl fmt::Display for Extremity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_round_trip_through_from_str() {
        for category in UtilizationCategory::ALL {
            assert_eq!(category.label().parse::<UtilizationCategory>().unwrap(), category);
        }
        assert!("Great".parse::<UtilizationCategory>().is_err());
    }

    #[test]
    fn category_serializes_with_display_label() {
        let json = serde_json::to_string(&UtilizationCategory::LowUtilization).unwrap();
        assert_eq!(json, "\"Low Utilization\"");
    }
}
