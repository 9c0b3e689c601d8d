//! Export of reconciliation results.
//!
//! Every run writes the same set of files into one directory:
//!
//! - `matched.csv`, `unmatched_administered.csv`, `unmatched_distributed.csv`
//! - `utilization.csv` with rate and category columns per vaccine
//! - `extremity_summary_<vaccine>.csv` for each vaccine with an extremity band
//! - `run.json` describing inputs, options, counts and the files above

#![deny(unsafe_code)]

pub mod common;
pub mod manifest;
pub mod tables;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;
use tri_core::Reconciliation;
use tri_metrics::Filter;
use tri_model::Role;
use tri_standards::Standards;

pub use common::{ensure_output_dir, ensure_parent_dir, file_sha256, sha256_hex};
pub use manifest::{InputFile, MANIFEST_FILE, RecordCounts, RunManifest, write_manifest};
pub use tables::{
    write_extremity_summary, write_file, write_matched, write_records_csv, write_unmatched,
    write_utilization,
};

/// Options for [`write_run_outputs`].
#[derive(Debug, Clone)]
pub struct ExportOptions<'a> {
    pub output_dir: &'a Path,
    pub filter: &'a Filter,
    pub inputs: Vec<InputFile>,
}

/// Writes every export plus the manifest; returns the written paths.
pub fn write_run_outputs(
    run: &Reconciliation,
    standards: &Standards,
    options: ExportOptions<'_>,
) -> Result<Vec<PathBuf>> {
    let dir = ensure_output_dir(options.output_dir)?;
    let mut written = Vec::new();

    let path = dir.join("matched.csv");
    write_file(&path, |file| write_matched(file, &run.matching.matched))?;
    written.push(path);

    for role in Role::ALL {
        let path = dir.join(format!("unmatched_{role}.csv"));
        write_file(&path, |file| {
            write_unmatched(file, role, run.matching.unmatched.side(role))
        })?;
        written.push(path);
    }

    let path = dir.join("utilization.csv");
    write_file(&path, |file| {
        write_utilization(file, &run.utilization, &run.vaccines, &standards.thresholds)
    })?;
    written.push(path);

    for vaccine in &run.vaccines {
        if standards.thresholds.extremity(vaccine).is_none() {
            continue;
        }
        let summary = run.extremity_summary(vaccine, options.filter, standards);
        let path = dir.join(format!("extremity_summary_{}.csv", vaccine.to_lowercase()));
        write_file(&path, |file| write_extremity_summary(file, &summary))?;
        written.push(path);
    }

    let mut manifest = RunManifest::new(run, &standards.thresholds, options.inputs);
    manifest.outputs = written.clone();
    let manifest_path = dir.join(MANIFEST_FILE);
    write_manifest(&manifest_path, &manifest)?;
    written.push(manifest_path);

    info!(dir = %dir.display(), files = written.len(), "wrote exports");
    Ok(written)
}
