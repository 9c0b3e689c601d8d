use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};
use tri_cli::types::{InspectResult, RunResult};
use tri_core::{ReconcileOptions, reconcile};
use tri_ingest::load_table;
use tri_map::{infer_schema, mandatory_fields, title_case, validate};
use tri_match::MatchOptions;
use tri_metrics::{Filter, has_rate};
use tri_model::Role;
use tri_report::{ExportOptions, InputFile, write_run_outputs};
use tri_standards::{Standards, ThresholdConfig};

use crate::cli::{InspectArgs, RunArgs, VaccinesArgs};

pub fn run_reconcile(args: &RunArgs) -> Result<RunResult> {
    let strategy = args.strategy.to_strategy(args.fuzzy_threshold);
    let run_span = info_span!("run", strategy = strategy.name(), dry_run = args.dry_run);
    let _run_guard = run_span.enter();

    let standards = load_standards(args.thresholds.as_deref())?;
    let administered = load_table(&args.administered, None)
        .with_context(|| format!("failed to load {}", args.administered.display()))?;
    let distributed = load_table(&args.distributed, None)
        .with_context(|| format!("failed to load {}", args.distributed.display()))?;

    let options = ReconcileOptions::default().with_matching(MatchOptions {
        strategy,
        duplicates: args.duplicates.into(),
    });
    let run = reconcile(&administered, &distributed, &standards, &options)?;

    let filter = build_filter(
        args.region.as_deref(),
        args.zone.as_deref(),
        args.woreda.as_deref(),
        args.period.as_deref(),
    );
    if !filter.is_empty() && run.filtered(&filter).is_empty() {
        warn!(?filter, "no records match the selection");
    }
    let vaccine = args
        .vaccine
        .as_deref()
        .map(|name| resolve_vaccine(name, &run.vaccines));
    if let Some(name) = &vaccine
        && !has_rate(&run.utilization, name)
    {
        warn!(vaccine = %name, "no utilization rates for vaccine");
    }

    let (output_dir, written) = if args.dry_run {
        info!("dry run, skipping exports");
        (None, Vec::new())
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.administered));
        let inputs = vec![
            InputFile::from_path(Role::Administered, &args.administered)?,
            InputFile::from_path(Role::Distributed, &args.distributed)?,
        ];
        let written = write_run_outputs(
            &run,
            &standards,
            ExportOptions {
                output_dir: &output_dir,
                filter: &filter,
                inputs,
            },
        )?;
        (Some(output_dir), written)
    };

    Ok(RunResult {
        run,
        standards,
        filter,
        vaccine,
        output_dir,
        written,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let role = Role::from(args.role);
    let _span = info_span!("inspect", %role).entered();

    let standards = load_standards(args.thresholds.as_deref())?;
    let table = load_table(&args.file, None)
        .with_context(|| format!("failed to load {}", args.file.display()))?;

    let rules = standards.fields.rules_for(role, standards.vaccines());
    let column_map = infer_schema(&table.columns, role, &rules);
    let missing = match validate(&column_map, &mandatory_fields(&rules, role)) {
        Ok(()) => Vec::new(),
        Err(error) => error.missing_fields().to_vec(),
    };

    Ok(InspectResult {
        path: args.file.clone(),
        role,
        rows: table.len(),
        columns: table.columns,
        column_map,
        missing,
    })
}

pub fn run_vaccines(args: &VaccinesArgs) -> Result<ThresholdConfig> {
    Ok(load_standards(args.thresholds.as_deref())?.thresholds)
}

fn load_standards(thresholds: Option<&Path>) -> Result<Standards> {
    match thresholds {
        Some(path) => Standards::load(Some(path))
            .with_context(|| format!("failed to load thresholds from {}", path.display())),
        None => Standards::load_default().context("failed to load built-in thresholds"),
    }
}

/// Geography selections are title-cased like the normalized records; the
/// period is compared as typed.
fn build_filter(
    region: Option<&str>,
    zone: Option<&str>,
    woreda: Option<&str>,
    period: Option<&str>,
) -> Filter {
    let geography = |value: Option<&str>| value.map(title_case).filter(|v| !v.is_empty());
    Filter {
        region: geography(region),
        zone: geography(zone),
        woreda: geography(woreda),
        period: period.map(str::trim).filter(|v| !v.is_empty()).map(String::from),
    }
}

/// Configured spelling of `name`, or `name` itself when it is not configured.
fn resolve_vaccine(name: &str, vaccines: &[String]) -> String {
    vaccines
        .iter()
        .find(|v| v.eq_ignore_ascii_case(name.trim()))
        .cloned()
        .unwrap_or_else(|| name.trim().to_string())
}

fn default_output_dir(administered: &Path) -> PathBuf {
    administered
        .parent()
        .map_or_else(|| PathBuf::from("output"), |dir| dir.join("output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vaccine_names_resolve_case_insensitively() {
        let vaccines = vec!["BCG".to_string(), "Measles".to_string()];
        assert_eq!(resolve_vaccine("measles", &vaccines), "Measles");
        assert_eq!(resolve_vaccine(" HPV ", &vaccines), "HPV");
    }

    #[test]
    fn geography_selection_follows_normalized_spelling() {
        let filter = build_filter(
            Some("oromia"),
            Some(" JIMMA "),
            Some("addis-ketema"),
            Some(" Jan-2024 "),
        );
        assert_eq!(filter.region.as_deref(), Some("Oromia"));
        assert_eq!(filter.zone.as_deref(), Some("Jimma"));
        assert_eq!(filter.woreda.as_deref(), Some("Addis-Ketema"));
        assert_eq!(filter.period.as_deref(), Some("Jan-2024"));
        assert!(build_filter(Some("  "), None, None, None).is_empty());
    }

    #[test]
    fn output_dir_defaults_next_to_administered_file() {
        assert_eq!(
            default_output_dir(Path::new("data/admin.csv")),
            PathBuf::from("data/output")
        );
    }
}
