//! Extremity counts and the per-region summary table.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;
use tri_model::{Extremity, ExtremitySummary, ExtremitySummaryRow, SummaryGrouping, UtilizationRecord};
use tri_standards::ThresholdConfig;

use crate::classify::classify_extremity;

#[derive(Default)]
struct GroupTally {
    facilities: BTreeSet<String>,
    high: usize,
    low: usize,
}

/// Groups records by region (or region and zone) and counts distinct
/// facilities plus records flagged high or low for `vaccine`.
///
/// Records without a rate still count toward the facility total.
pub fn summarize_extremities<'a, I>(
    records: I,
    vaccine: &str,
    thresholds: &ThresholdConfig,
    grouping: SummaryGrouping,
) -> ExtremitySummary
where
    I: IntoIterator<Item = &'a UtilizationRecord>,
{
    let mut groups: BTreeMap<(String, Option<String>), GroupTally> = BTreeMap::new();
    for record in records {
        let key = match grouping {
            SummaryGrouping::Region => (record.region(), None),
            SummaryGrouping::RegionZone => (record.region(), Some(record.zone())),
        };
        let tally = groups.entry(key).or_default();
        tally.facilities.insert(record.woreda());
        match record
            .rate(vaccine)
            .and_then(|rate| classify_extremity(rate, vaccine, thresholds))
        {
            Some(Extremity::High) => tally.high += 1,
            Some(Extremity::Low) => tally.low += 1,
            _ => {}
        }
    }

    let rows: Vec<ExtremitySummaryRow> = groups
        .into_iter()
        .map(|((region, zone), tally)| ExtremitySummaryRow {
            region,
            zone,
            total_facilities: tally.facilities.len(),
            high_extreme_count: tally.high,
            low_extreme_count: tally.low,
        })
        .collect();
    debug!(vaccine, groups = rows.len(), ?grouping, "summarized extremities");

    ExtremitySummary {
        vaccine: vaccine.to_string(),
        grouping,
        rows,
    }
}

/// High and low counts for one vaccine over a record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtremityCount {
    pub vaccine: String,
    /// `None` when the vaccine has no extremity band or no rates.
    pub counts: Option<(usize, usize)>,
}

pub fn extremity_counts(
    records: &[&UtilizationRecord],
    vaccines: &[String],
    thresholds: &ThresholdConfig,
) -> Vec<ExtremityCount> {
    vaccines
        .iter()
        .map(|vaccine| {
            let has_rates = records.iter().any(|r| r.rate(vaccine).is_some());
            let counts = (has_rates && thresholds.extremity(vaccine).is_some()).then(|| {
                records
                    .iter()
                    .filter_map(|r| r.rate(vaccine))
                    .filter_map(|rate| classify_extremity(rate, vaccine, thresholds))
                    .fold((0, 0), |(high, low), flag| match flag {
                        Extremity::High => (high + 1, low),
                        Extremity::Low => (high, low + 1),
                        Extremity::Within => (high, low),
                    })
            });
            ExtremityCount {
                vaccine: vaccine.clone(),
                counts,
            }
        })
        .collect()
}
