//! Partition of each side into matched and unmatched records.

use std::collections::BTreeSet;

use tri_model::{NormalizedTable, UnmatchedRecords};

/// Every record whose key is outside the given matched key set, per side.
///
/// Blank keys are never in a matched set, so their records always land here.
pub fn resolve_unmatched(
    admin: &NormalizedTable,
    dist: &NormalizedTable,
    matched_admin_keys: &BTreeSet<String>,
    matched_dist_keys: &BTreeSet<String>,
) -> UnmatchedRecords {
    let outside = |table: &NormalizedTable, keys: &BTreeSet<String>| {
        table
            .records
            .iter()
            .filter(|record| !keys.contains(&record.entity_key))
            .cloned()
            .collect::<Vec<_>>()
    };
    UnmatchedRecords {
        administered: outside(admin, matched_admin_keys),
        distributed: outside(dist, matched_dist_keys),
    }
}
