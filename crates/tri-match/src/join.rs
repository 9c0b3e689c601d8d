//! Equi-join of normalized records on (facility key, period).

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};
use tri_model::{MatchedRecord, NormalizedRecord, NormalizedTable, Role, columns};

use crate::options::DuplicatePolicy;

/// Suffix given to distributed columns whose name is already taken.
pub const DIST_SUFFIX: &str = "_Dist";

/// Records taking part in a join, after the duplicate policy ran.
#[derive(Debug)]
pub(crate) struct JoinSide<'a> {
    pub role: Role,
    pub records: Vec<&'a NormalizedRecord>,
    pub dropped: usize,
}

impl<'a> JoinSide<'a> {
    pub fn new(table: &'a NormalizedTable, policy: DuplicatePolicy) -> Self {
        let role = table.role;
        match policy {
            DuplicatePolicy::FanOut => Self {
                role,
                records: table.records.iter().collect(),
                dropped: 0,
            },
            DuplicatePolicy::KeepFirst => {
                let mut seen = BTreeSet::new();
                let mut records = Vec::with_capacity(table.records.len());
                let mut dropped = 0;
                for record in &table.records {
                    if seen.insert((record.entity_key.as_str(), record.period(role))) {
                        records.push(record);
                    } else {
                        dropped += 1;
                        debug!(%role, row = record.row_index, "dropping duplicate facility/period row");
                    }
                }
                Self {
                    role,
                    records,
                    dropped,
                }
            }
        }
    }
}

/// Pairs every administered record with every distributed record whose key
/// (after `resolve`) and period agree.
///
/// Output order follows the administered side, then the distributed side.
/// Records with a blank key never take part.
pub(crate) fn join<F>(admin: &JoinSide<'_>, dist: &JoinSide<'_>, resolve: F) -> Vec<MatchedRecord>
where
    F: Fn(&str) -> Option<String>,
{
    let mut index: HashMap<(String, String), Vec<&NormalizedRecord>> = HashMap::new();
    for record in dist.records.iter().copied() {
        if record.entity_key.is_empty() {
            continue;
        }
        index
            .entry((record.entity_key.clone(), record.period(dist.role)))
            .or_default()
            .push(record);
    }

    let mut matched = Vec::new();
    for admin_record in admin.records.iter().copied() {
        if admin_record.entity_key.is_empty() {
            continue;
        }
        let Some(dist_key) = resolve(&admin_record.entity_key) else {
            continue;
        };
        let period = admin_record.period(admin.role);
        let Some(partners) = index.get(&(dist_key, period.clone())) else {
            continue;
        };
        for dist_record in partners {
            matched.push(merge(admin_record, dist_record, &period));
        }
    }

    info!(
        admin = admin.records.len(),
        dist = dist.records.len(),
        matched = matched.len(),
        "joined records"
    );
    matched
}

/// Union of both rows: administered cells as-is, distributed cells except
/// the distributed period, plus the derived `Period`.
pub(crate) fn merge(admin: &NormalizedRecord, dist: &NormalizedRecord, period: &str) -> MatchedRecord {
    let mut cells = admin.cells.clone();
    for (name, value) in &dist.cells {
        if name == columns::PERIOD_DIST {
            continue;
        }
        if cells.contains_key(name) {
            cells.insert(format!("{name}{DIST_SUFFIX}"), value.clone());
        } else {
            cells.insert(name.clone(), value.clone());
        }
    }
    cells.insert(columns::PERIOD.to_string(), period.into());

    MatchedRecord {
        entity_key: admin.entity_key.clone(),
        period: period.to_string(),
        admin_row: admin.row_index,
        dist_row: dist.row_index,
        cells,
    }
}

/// Distinct non-blank keys in first-seen order.
pub(crate) fn distinct_keys(records: &[&NormalizedRecord]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .map(|record| record.entity_key.as_str())
        .filter(|key| !key.is_empty() && seen.insert(*key))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_model::CellValue;

    fn record(row_index: usize, key: &str, cells: &[(&str, CellValue)]) -> NormalizedRecord {
        NormalizedRecord {
            row_index,
            entity_key: key.to_string(),
            cells: cells
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }

    #[test]
    fn merge_drops_dist_period_and_suffixes_collisions() {
        let admin = record(
            0,
            "bole",
            &[
                ("Woreda_Admin", "Bole".into()),
                ("Period_Admin", "Jan".into()),
                ("Remarks", "admin note".into()),
            ],
        );
        let dist = record(
            3,
            "bole",
            &[
                ("Woreda_Dist", "Bole".into()),
                ("Period_Dist", "Jan".into()),
                ("Remarks", "dist note".into()),
                ("BCG_Distributed", 100.0.into()),
            ],
        );
        let matched = merge(&admin, &dist, "Jan");
        assert_eq!(matched.text("Period"), "Jan");
        assert!(!matched.has_column("Period_Dist"));
        assert_eq!(matched.text("Remarks"), "admin note");
        assert_eq!(matched.text("Remarks_Dist"), "dist note");
        assert_eq!(matched.get("BCG_Distributed"), Some(&CellValue::Number(100.0)));
        assert_eq!((matched.admin_row, matched.dist_row), (0, 3));
    }

    #[test]
    fn distinct_keys_keep_first_seen_order() {
        let a = record(0, "kirkos", &[]);
        let b = record(1, "", &[]);
        let c = record(2, "bole", &[]);
        let d = record(3, "kirkos", &[]);
        assert_eq!(distinct_keys(&[&a, &b, &c, &d]), vec!["kirkos", "bole"]);
    }
}
