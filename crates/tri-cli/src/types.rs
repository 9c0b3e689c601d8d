use std::path::PathBuf;

use tri_core::Reconciliation;
use tri_metrics::Filter;
use tri_model::{Role, SemanticColumnMap};
use tri_standards::Standards;

/// Everything `run` prints after the pipeline finished.
#[derive(Debug)]
pub struct RunResult {
    pub run: Reconciliation,
    pub standards: Standards,
    pub filter: Filter,
    /// Vaccine selected for the detailed views.
    pub vaccine: Option<String>,
    /// `None` on a dry run.
    pub output_dir: Option<PathBuf>,
    pub written: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct InspectResult {
    pub path: PathBuf,
    pub role: Role,
    pub rows: usize,
    pub columns: Vec<String>,
    pub column_map: SemanticColumnMap,
    pub missing: Vec<String>,
}

impl InspectResult {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Raw headers no rule claimed.
    pub fn unbound_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|column| self.column_map.canonical_for(column).is_none())
            .map(String::as_str)
            .collect()
    }
}
