//! Extremity summaries grouped by geography.

use serde::{Deserialize, Serialize};

/// Geographic granularity of an extremity summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryGrouping {
    Region,
    RegionZone,
}

/// Counts for one geographic group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremitySummaryRow {
    pub region: String,
    pub zone: Option<String>,
    /// Distinct facilities in the group.
    pub total_facilities: usize,
    pub high_extreme_count: usize,
    pub low_extreme_count: usize,
}

/// Extremity counts for one vaccine, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremitySummary {
    pub vaccine: String,
    pub grouping: SummaryGrouping,
    pub rows: Vec<ExtremitySummaryRow>,
}

impl ExtremitySummary {
    pub fn total_high(&self) -> usize {
        self.rows.iter().map(|r| r.high_extreme_count).sum()
    }

    pub fn total_low(&self) -> usize {
        self.rows.iter().map(|r| r.low_extreme_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
