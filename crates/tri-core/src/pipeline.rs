//! Reconciliation pipeline with explicit stages.
//!
//! 1. **Normalize**: infer and validate each side's schema, rename rows
//! 2. **Match**: join administered and distributed records
//! 3. **Utilization**: per-vaccine rates on every matched record
//!
//! Summaries are computed on demand from the final [`Reconciliation`].
//! Every stage takes the previous stage's output by reference and returns a
//! new value; the caller's tables are never modified.

use tracing::{info, info_span};
use tri_map::normalize_table;
use tri_match::{MatchOutcome, match_records};
use tri_metrics::{Filter, compute_utilization, summarize_extremities};
use tri_model::{ExtremitySummary, NormalizedTable, RawTable, Role, UtilizationRecord};
use tri_standards::Standards;

use crate::error::{PipelineError, Result};
use crate::options::ReconcileOptions;

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub administered: NormalizedTable,
    pub distributed: NormalizedTable,
    pub matching: MatchOutcome,
    pub utilization: Vec<UtilizationRecord>,
    /// Vaccines rates were computed for, in reporting order.
    pub vaccines: Vec<String>,
}

impl Reconciliation {
    /// Utilization records passing `filter`.
    pub fn filtered(&self, filter: &Filter) -> Vec<&UtilizationRecord> {
        filter.apply(&self.utilization)
    }

    /// Extremity summary for one vaccine, grouped according to `filter`.
    pub fn extremity_summary(
        &self,
        vaccine: &str,
        filter: &Filter,
        standards: &Standards,
    ) -> ExtremitySummary {
        let _span = info_span!("summary", vaccine).entered();
        summarize_extremities(
            self.filtered(filter),
            vaccine,
            &standards.thresholds,
            filter.summary_grouping(),
        )
    }
}

/// Schema inference and renaming for one side.
pub fn normalize(table: &RawTable, role: Role, standards: &Standards, vaccines: &[String]) -> Result<NormalizedTable> {
    let _span = info_span!("normalize", %role, source = %table.source).entered();
    let rules = standards.fields.rules_for(role, vaccines);
    Ok(normalize_table(table, role, &rules)?)
}

/// Runs normalize, match and utilization on two raw tables.
///
/// Stops before matching when either side lacks a mandatory field.
pub fn reconcile(
    administered: &RawTable,
    distributed: &RawTable,
    standards: &Standards,
    options: &ReconcileOptions,
) -> Result<Reconciliation> {
    let vaccines = options
        .vaccines
        .clone()
        .unwrap_or_else(|| standards.vaccines().to_vec());
    if vaccines.is_empty() {
        return Err(PipelineError::NoVaccines);
    }

    let admin = normalize(administered, Role::Administered, standards, &vaccines)?;
    let dist = normalize(distributed, Role::Distributed, standards, &vaccines)?;

    let matching = {
        let _span = info_span!("match", strategy = options.matching.strategy.name()).entered();
        match_records(&admin, &dist, &options.matching)?
    };

    let utilization = {
        let _span = info_span!("utilization", vaccines = vaccines.len()).entered();
        compute_utilization(&matching.matched, &vaccines)
    };

    info!(
        administered = admin.len(),
        distributed = dist.len(),
        matched = matching.matched.len(),
        unmatched_admin = matching.unmatched.administered.len(),
        unmatched_dist = matching.unmatched.distributed.len(),
        "reconciliation complete"
    );

    Ok(Reconciliation {
        administered: admin,
        distributed: dist,
        matching,
        utilization,
        vaccines,
    })
}
