//! Reporting views over filtered utilization records.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tri_model::{Role, UtilizationCategory, UtilizationRecord};
use tri_standards::ThresholdConfig;

use crate::classify::categorize;
use crate::filter::Filter;

/// Headline totals for a record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub total_facilities: usize,
    pub total_administered: f64,
    pub total_distributed: f64,
    /// Administered over distributed in percent; 0 when nothing was distributed.
    pub overall_utilization: f64,
}

/// Totals for one vaccine, or summed over every vaccine in `vaccines`
/// whose columns exist when `vaccine` is `None`.
pub fn scorecard(
    records: &[&UtilizationRecord],
    vaccine: Option<&str>,
    vaccines: &[String],
) -> Scorecard {
    let selected: Vec<&str> = match vaccine {
        Some(v) => vec![v],
        None => vaccines.iter().map(String::as_str).collect(),
    };

    let total = |role: Role| -> f64 {
        records
            .iter()
            .flat_map(|record| selected.iter().filter_map(move |v| record.quantity(v, role)))
            .sum()
    };
    let total_administered = total(Role::Administered);
    let total_distributed = total(Role::Distributed);
    let overall_utilization = if total_distributed > 0.0 {
        total_administered / total_distributed * 100.0
    } else {
        0.0
    };

    Scorecard {
        total_facilities: records
            .iter()
            .map(|r| r.woreda())
            .collect::<BTreeSet<_>>()
            .len(),
        total_administered,
        total_distributed,
        overall_utilization,
    }
}

/// Count per category among records that have a rate for `vaccine`.
/// Every category is present, zero or not.
pub fn category_counts(
    records: &[&UtilizationRecord],
    vaccine: &str,
    thresholds: &ThresholdConfig,
) -> BTreeMap<UtilizationCategory, usize> {
    let mut counts: BTreeMap<UtilizationCategory, usize> =
        UtilizationCategory::ALL.into_iter().map(|c| (c, 0)).collect();
    for rate in records.iter().filter_map(|r| r.rate(vaccine)) {
        *counts.entry(categorize(rate, vaccine, thresholds)).or_default() += 1;
    }
    counts
}

/// Geographic level of a breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreakdownLevel {
    Region,
    Zone,
    Woreda,
}

impl BreakdownLevel {
    /// Woreda under a zone selection, zone under a region selection, region otherwise.
    pub fn for_filter(filter: &Filter) -> Self {
        if filter.zone.is_some() {
            Self::Woreda
        } else if filter.region.is_some() {
            Self::Zone
        } else {
            Self::Region
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Region => "Region",
            Self::Zone => "Zone",
            Self::Woreda => "Woreda",
        }
    }

    fn value(self, record: &UtilizationRecord) -> String {
        match self {
            Self::Region => record.region(),
            Self::Zone => record.zone(),
            Self::Woreda => record.woreda(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub group: String,
    pub category: UtilizationCategory,
    pub count: usize,
    pub group_total: usize,
    /// Share of the group, rounded to two decimals.
    pub percentage: f64,
}

/// Category shares per geographic group, groups ascending.
pub fn geographic_breakdown(
    records: &[&UtilizationRecord],
    vaccine: &str,
    thresholds: &ThresholdConfig,
    level: BreakdownLevel,
) -> Vec<BreakdownRow> {
    let mut groups: BTreeMap<String, BTreeMap<UtilizationCategory, usize>> = BTreeMap::new();
    for record in records {
        if let Some(rate) = record.rate(vaccine) {
            *groups
                .entry(level.value(record))
                .or_default()
                .entry(categorize(rate, vaccine, thresholds))
                .or_default() += 1;
        }
    }

    let mut rows = Vec::new();
    for (group, categories) in groups {
        let group_total: usize = categories.values().sum();
        for (category, count) in categories {
            rows.push(BreakdownRow {
                group: group.clone(),
                category,
                count,
                group_total,
                percentage: round2(count as f64 / group_total as f64 * 100.0),
            });
        }
    }
    rows
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityRow {
    pub region: String,
    pub zone: String,
    pub woreda: String,
    pub period: String,
    pub administered: f64,
    pub distributed: f64,
    pub rate: f64,
    pub category: UtilizationCategory,
}

/// One row per record with a rate for `vaccine`, highest rate first.
pub fn facility_view(
    records: &[&UtilizationRecord],
    vaccine: &str,
    thresholds: &ThresholdConfig,
) -> Vec<FacilityRow> {
    let mut rows: Vec<FacilityRow> = records
        .iter()
        .filter_map(|record| {
            let rate = record.rate(vaccine)?;
            Some(FacilityRow {
                region: record.region(),
                zone: record.zone(),
                woreda: record.woreda(),
                period: record.period().to_string(),
                administered: record.quantity(vaccine, Role::Administered).unwrap_or(0.0),
                distributed: record.quantity(vaccine, Role::Distributed).unwrap_or(0.0),
                rate,
                category: categorize(rate, vaccine, thresholds),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.rate.total_cmp(&a.rate));
    rows
}
