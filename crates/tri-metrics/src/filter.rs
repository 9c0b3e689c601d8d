//! Geographic and period filters over utilization records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tri_model::{SummaryGrouping, UtilizationRecord};

/// Selection applied before every view. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub region: Option<String>,
    pub zone: Option<String>,
    pub woreda: Option<String>,
    pub period: Option<String>,
}

impl Filter {
    pub fn matches(&self, record: &UtilizationRecord) -> bool {
        fn accepts(selected: &Option<String>, value: &str) -> bool {
            selected.as_deref().is_none_or(|wanted| wanted == value)
        }
        accepts(&self.region, &record.region())
            && accepts(&self.zone, &record.zone())
            && accepts(&self.woreda, &record.woreda())
            && accepts(&self.period, record.period())
    }

    pub fn apply<'a>(&self, records: &'a [UtilizationRecord]) -> Vec<&'a UtilizationRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.zone.is_none() && self.woreda.is_none() && self.period.is_none()
    }

    /// Region alone unless a region is selected, then region and zone.
    pub fn summary_grouping(&self) -> SummaryGrouping {
        if self.region.is_some() {
            SummaryGrouping::RegionZone
        } else {
            SummaryGrouping::Region
        }
    }
}

/// Choices offered for each filter, narrowed by the selections above them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub zones: Vec<String>,
    pub woredas: Vec<String>,
    pub periods: Vec<String>,
}

impl FilterOptions {
    /// Zones are limited to the selected region; woredas to the selected
    /// zone (within the region) or region. Periods are never narrowed.
    pub fn from_records(records: &[UtilizationRecord], selection: &Filter) -> Self {
        let distinct = |values: &mut dyn Iterator<Item = String>| -> Vec<String> {
            values
                .filter(|v| !v.is_empty())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };
        let in_region = |r: &&UtilizationRecord| {
            selection
                .region
                .as_deref()
                .is_none_or(|region| r.region() == region)
        };
        let in_zone = |r: &&UtilizationRecord| {
            selection.zone.as_deref().is_none_or(|zone| r.zone() == zone)
        };

        Self {
            regions: distinct(&mut records.iter().map(UtilizationRecord::region)),
            zones: distinct(&mut records.iter().filter(in_region).map(UtilizationRecord::zone)),
            woredas: distinct(
                &mut records
                    .iter()
                    .filter(in_region)
                    .filter(in_zone)
                    .map(UtilizationRecord::woreda),
            ),
            periods: distinct(&mut records.iter().map(|r| r.period().to_string())),
        }
    }
}
