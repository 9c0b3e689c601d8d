//! Record matching between administered and distributed tables.
//!
//! Two strategies share one join:
//!
//! - **Exact**: the administered `entity_key` must equal the distributed one.
//! - **Fuzzy**: facility names are first resolved greedily by similarity
//!   (see [`resolve_names`]); the join then uses the resolved distributed key.
//!
//! In both cases the reporting period must agree exactly. Unmatched records
//! are partitioned by key, never by (key, period), so a facility whose key
//! matched is not listed as unmatched for the periods that did not.

#![deny(unsafe_code)]

pub mod error;
pub mod fuzzy;
pub mod join;
pub mod options;
pub mod unmatched;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{info, warn};
use tri_model::{MatchedRecord, NormalizedTable, UnmatchedRecords};

pub use error::{MatchError, Result};
pub use fuzzy::{NameBinding, resolve_names, similarity};
pub use join::DIST_SUFFIX;
pub use options::{DEFAULT_FUZZY_THRESHOLD, DuplicatePolicy, MatchOptions, MatchStrategy};
pub use unmatched::resolve_unmatched;

use join::{JoinSide, distinct_keys, join};

/// Everything the matcher produces for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub strategy: MatchStrategy,
    pub duplicates: DuplicatePolicy,
    pub matched: Vec<MatchedRecord>,
    pub unmatched: UnmatchedRecords,
    /// Name-level resolutions; empty for the exact strategy.
    pub name_bindings: Vec<NameBinding>,
    /// Rows left out by [`DuplicatePolicy::KeepFirst`] (administered, distributed).
    pub dropped_duplicates: (usize, usize),
}

/// Joins the two normalized tables according to `options`.
pub fn match_records(
    admin: &NormalizedTable,
    dist: &NormalizedTable,
    options: &MatchOptions,
) -> Result<MatchOutcome> {
    options.strategy.validate()?;

    let admin_side = JoinSide::new(admin, options.duplicates);
    let dist_side = JoinSide::new(dist, options.duplicates);
    if admin_side.dropped + dist_side.dropped > 0 {
        warn!(
            admin = admin_side.dropped,
            dist = dist_side.dropped,
            "duplicate facility/period rows left out"
        );
    }

    let (matched, name_bindings, admin_keys, dist_keys) = match options.strategy {
        MatchStrategy::Exact => {
            let matched = join(&admin_side, &dist_side, |key| Some(key.to_string()));
            let keys: BTreeSet<String> = matched.iter().map(|m| m.entity_key.clone()).collect();
            (matched, Vec::new(), keys.clone(), keys)
        }
        MatchStrategy::Fuzzy { threshold } => {
            let bindings = resolve_names(
                &distinct_keys(&admin_side.records),
                &distinct_keys(&dist_side.records),
                threshold,
            );
            let lookup: BTreeMap<&str, &str> = bindings
                .iter()
                .map(|b| (b.admin_key.as_str(), b.dist_key.as_str()))
                .collect();
            let matched = join(&admin_side, &dist_side, |key| {
                lookup.get(key).map(|dist_key| (*dist_key).to_string())
            });
            let admin_keys = bindings.iter().map(|b| b.admin_key.clone()).collect();
            let dist_keys = bindings.iter().map(|b| b.dist_key.clone()).collect();
            (matched, bindings, admin_keys, dist_keys)
        }
    };

    let unmatched = resolve_unmatched(admin, dist, &admin_keys, &dist_keys);
    info!(
        strategy = options.strategy.name(),
        matched = matched.len(),
        unmatched_admin = unmatched.administered.len(),
        unmatched_dist = unmatched.distributed.len(),
        "matched records"
    );

    Ok(MatchOutcome {
        strategy: options.strategy,
        duplicates: options.duplicates,
        matched,
        unmatched,
        name_bindings,
        dropped_duplicates: (admin_side.dropped, dist_side.dropped),
    })
}
