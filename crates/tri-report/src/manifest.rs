//! `run.json`: what was run, on which inputs, and what was written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tri_core::Reconciliation;
use tri_match::{DuplicatePolicy, MatchStrategy};
use tri_model::Role;
use tri_standards::ThresholdConfig;

use crate::common::{ensure_parent_dir, file_sha256};

pub const MANIFEST_FILE: &str = "run.json";

#[derive(Debug, Clone, Serialize)]
pub struct InputFile {
    pub role: Role,
    pub path: PathBuf,
    pub sha256: String,
}

impl InputFile {
    pub fn from_path(role: Role, path: &Path) -> Result<Self> {
        Ok(Self {
            role,
            path: path.to_path_buf(),
            sha256: file_sha256(path)?,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordCounts {
    pub administered: usize,
    pub distributed: usize,
    pub matched: usize,
    pub unmatched_administered: usize,
    pub unmatched_distributed: usize,
    pub name_bindings: usize,
    pub dropped_duplicates_administered: usize,
    pub dropped_duplicates_distributed: usize,
}

impl RecordCounts {
    pub fn from_run(run: &Reconciliation) -> Self {
        Self {
            administered: run.administered.len(),
            distributed: run.distributed.len(),
            matched: run.matching.matched.len(),
            unmatched_administered: run.matching.unmatched.administered.len(),
            unmatched_distributed: run.matching.unmatched.distributed.len(),
            name_bindings: run.matching.name_bindings.len(),
            dropped_duplicates_administered: run.matching.dropped_duplicates.0,
            dropped_duplicates_distributed: run.matching.dropped_duplicates.1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    pub strategy: MatchStrategy,
    pub duplicates: DuplicatePolicy,
    pub vaccines: Vec<String>,
    pub thresholds: ThresholdConfig,
    pub inputs: Vec<InputFile>,
    pub counts: RecordCounts,
    pub outputs: Vec<PathBuf>,
}

impl RunManifest {
    pub fn new(run: &Reconciliation, thresholds: &ThresholdConfig, inputs: Vec<InputFile>) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            strategy: run.matching.strategy,
            duplicates: run.matching.duplicates,
            vaccines: run.vaccines.clone(),
            thresholds: thresholds.clone(),
            inputs,
            counts: RecordCounts::from_run(run),
            outputs: Vec::new(),
        }
    }
}

/// Writes the manifest as pretty JSON.
pub fn write_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(manifest).context("serialize run manifest")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
