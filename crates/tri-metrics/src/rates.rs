//! Per-vaccine utilization rates.

use tracing::debug;
use tri_model::{MatchedRecord, Role, UtilizationRecord};

/// Upper bound applied to every rate, in percent.
pub const RATE_CEILING: f64 = 1000.0;

/// `administered / max(distributed, 1) * 100`, clamped to `[0, RATE_CEILING]`.
pub fn utilization_rate(administered: f64, distributed: f64) -> f64 {
    let rate = administered / distributed.max(1.0) * 100.0;
    if rate.is_nan() {
        0.0
    } else {
        rate.clamp(0.0, RATE_CEILING)
    }
}

/// Attaches a rate for every vaccine whose two quantity columns are present
/// on the record. Blank or non-numeric quantities count as 0.
pub fn compute_utilization(matched: &[MatchedRecord], vaccines: &[String]) -> Vec<UtilizationRecord> {
    let mut records = Vec::with_capacity(matched.len());
    let mut skipped = 0usize;
    for record in matched {
        let mut utilization = UtilizationRecord {
            record: record.clone(),
            rates: Default::default(),
        };
        for vaccine in vaccines {
            match (
                utilization.quantity(vaccine, Role::Administered),
                utilization.quantity(vaccine, Role::Distributed),
            ) {
                (Some(administered), Some(distributed)) => {
                    utilization
                        .rates
                        .insert(vaccine.clone(), utilization_rate(administered, distributed));
                }
                _ => skipped += 1,
            }
        }
        records.push(utilization);
    }
    debug!(
        records = records.len(),
        vaccines = vaccines.len(),
        skipped,
        "computed utilization rates"
    );
    records
}

/// True when at least one record carries a rate for `vaccine`.
pub fn has_rate(records: &[UtilizationRecord], vaccine: &str) -> bool {
    records.iter().any(|r| r.rate(vaccine).is_some())
}
