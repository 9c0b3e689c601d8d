//! Terminal rendering for `triangulate` results.
//!
//! Row builders are kept separate from the comfy-table styling so the
//! numbers can be checked without a terminal.

use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tri_match::{MatchOutcome, MatchStrategy};
use tri_metrics::{
    BreakdownLevel, BreakdownRow, ExtremityCount, FacilityRow, Filter, Scorecard,
    category_counts, extremity_counts, facility_view, geographic_breakdown, scorecard,
};
use tri_model::{
    CellValue, ExtremitySummary, SemanticColumnMap, SummaryGrouping, UtilizationCategory,
};
use tri_standards::ThresholdConfig;

use crate::types::{InspectResult, RunResult};

/// Facilities listed under `--vaccine`, highest rates first.
const FACILITY_LIMIT: usize = 15;

pub fn print_run_summary(result: &RunResult) {
    let run = &result.run;
    println!(
        "Administered: {} ({} rows)",
        run.administered.source,
        run.administered.len()
    );
    println!(
        "Distributed: {} ({} rows)",
        run.distributed.source,
        run.distributed.len()
    );
    println!("{}", key_value_table("Matching", &match_rows(&run.matching)));

    let records = run.filtered(&result.filter);
    if !result.filter.is_empty() {
        println!(
            "Filter: {} ({} of {} records)",
            describe_filter(&result.filter),
            records.len(),
            run.utilization.len()
        );
    }

    let card = scorecard(&records, result.vaccine.as_deref(), &run.vaccines);
    let title = match &result.vaccine {
        Some(vaccine) => format!("Scorecard ({vaccine})"),
        None => "Scorecard (all vaccines)".to_string(),
    };
    println!("{}", key_value_table(&title, &scorecard_rows(&card)));

    let counts = extremity_counts(&records, &run.vaccines, &result.standards.thresholds);
    println!(
        "{}",
        grid_table(
            &["Vaccine", "High extremes", "Low extremes"],
            &extremity_count_rows(&counts),
            1,
        )
    );

    if let Some(vaccine) = &result.vaccine {
        let categories = category_counts(&records, vaccine, &result.standards.thresholds);
        println!(
            "{}",
            grid_table(
                &["Utilization category", "Records"],
                &category_rows(&categories),
                1
            )
        );

        let level = BreakdownLevel::for_filter(&result.filter);
        let breakdown = geographic_breakdown(&records, vaccine, &result.standards.thresholds, level);
        if !breakdown.is_empty() {
            println!(
                "{}",
                grid_table(
                    &[level.label(), "Category", "Records", "Share"],
                    &breakdown_rows(&breakdown),
                    2
                )
            );
        }

        let facilities = facility_view(&records, vaccine, &result.standards.thresholds);
        if !facilities.is_empty() {
            println!(
                "{}",
                grid_table(
                    &[
                        "Woreda",
                        "Zone",
                        "Period",
                        "Administered",
                        "Distributed",
                        "Rate",
                        "Category",
                    ],
                    &facility_rows(&facilities, FACILITY_LIMIT),
                    3
                )
            );
            if facilities.len() > FACILITY_LIMIT {
                println!(
                    "{} more facilities in utilization.csv",
                    facilities.len() - FACILITY_LIMIT
                );
            }
        }

        let summary = run.extremity_summary(vaccine, &result.filter, &result.standards);
        if summary.is_empty() {
            println!("No {vaccine} rates for the current selection.");
        } else {
            let headers = extremity_summary_headers(summary.grouping);
            let first_numeric = headers.len() - 3;
            println!(
                "{}",
                grid_table(&headers, &extremity_summary_rows(&summary), first_numeric)
            );
        }
    }

    match &result.output_dir {
        Some(dir) => {
            println!("Output: {}", dir.display());
            for path in &result.written {
                println!("  {}", path.display());
            }
        }
        None => println!("Dry run: no files written."),
    }
}

pub fn print_inspect(result: &InspectResult) {
    println!(
        "{} ({} table, {} rows, {} columns)",
        result.path.display(),
        result.role,
        result.rows,
        result.columns.len()
    );
    println!(
        "{}",
        grid_table(
            &["Canonical", "Header", "Pattern"],
            &binding_rows(&result.column_map),
            3
        )
    );
    let unbound = result.unbound_columns();
    if !unbound.is_empty() {
        println!("Unbound headers: {}", unbound.join(", "));
    }
    if result.is_complete() {
        println!("All mandatory fields bound.");
    } else {
        eprintln!("Missing mandatory fields:");
        for field in &result.missing {
            eprintln!("- {field}");
        }
    }
}

pub fn print_vaccines(thresholds: &ThresholdConfig) {
    println!(
        "{}",
        grid_table(
            &[
                "Vaccine",
                "Acceptable",
                "Unacceptable",
                "High extreme",
                "Low extreme",
                "Discrepancy",
            ],
            &vaccine_rows(thresholds),
            1,
        )
    );
}

pub fn match_rows(outcome: &MatchOutcome) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Strategy".to_string(), outcome.strategy.to_string()),
        ("Duplicates".to_string(), outcome.duplicates.to_string()),
        ("Matched".to_string(), outcome.matched.len().to_string()),
        (
            "Unmatched administered".to_string(),
            outcome.unmatched.administered.len().to_string(),
        ),
        (
            "Unmatched distributed".to_string(),
            outcome.unmatched.distributed.len().to_string(),
        ),
    ];
    if matches!(outcome.strategy, MatchStrategy::Fuzzy { .. }) {
        rows.push((
            "Name bindings".to_string(),
            outcome.name_bindings.len().to_string(),
        ));
    }
    let (admin, dist) = outcome.dropped_duplicates;
    if admin + dist > 0 {
        rows.push((
            "Duplicates left out".to_string(),
            format!("{admin} administered, {dist} distributed"),
        ));
    }
    rows
}

pub fn scorecard_rows(card: &Scorecard) -> Vec<(String, String)> {
    vec![
        ("Facilities".to_string(), card.total_facilities.to_string()),
        (
            "Administered".to_string(),
            format_quantity(card.total_administered),
        ),
        (
            "Distributed".to_string(),
            format_quantity(card.total_distributed),
        ),
        (
            "Utilization".to_string(),
            format!("{:.1}%", card.overall_utilization),
        ),
    ]
}

pub fn extremity_count_rows(counts: &[ExtremityCount]) -> Vec<Vec<String>> {
    counts
        .iter()
        .map(|count| match count.counts {
            Some((high, low)) => vec![count.vaccine.clone(), high.to_string(), low.to_string()],
            None => vec![count.vaccine.clone(), "-".to_string(), "-".to_string()],
        })
        .collect()
}

pub fn category_rows(counts: &BTreeMap<UtilizationCategory, usize>) -> Vec<Vec<String>> {
    UtilizationCategory::ALL
        .into_iter()
        .map(|category| {
            let count = counts.get(&category).copied().unwrap_or(0);
            vec![category.label().to_string(), count.to_string()]
        })
        .collect()
}

pub fn extremity_summary_headers(grouping: SummaryGrouping) -> Vec<&'static str> {
    match grouping {
        SummaryGrouping::Region => {
            vec!["Region", "Woredas", "High extremes", "Low extremes"]
        }
        SummaryGrouping::RegionZone => {
            vec!["Region", "Zone", "Woredas", "High extremes", "Low extremes"]
        }
    }
}

pub fn extremity_summary_rows(summary: &ExtremitySummary) -> Vec<Vec<String>> {
    summary
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.region.clone()];
            if summary.grouping == SummaryGrouping::RegionZone {
                cells.push(row.zone.clone().unwrap_or_default());
            }
            cells.push(row.total_facilities.to_string());
            cells.push(row.high_extreme_count.to_string());
            cells.push(row.low_extreme_count.to_string());
            cells
        })
        .collect()
}

pub fn breakdown_rows(rows: &[BreakdownRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| {
            vec![
                row.group.clone(),
                row.category.label().to_string(),
                format!("{}/{}", row.count, row.group_total),
                format!("{:.2}%", row.percentage),
            ]
        })
        .collect()
}

pub fn facility_rows(rows: &[FacilityRow], limit: usize) -> Vec<Vec<String>> {
    rows.iter()
        .take(limit)
        .map(|row| {
            vec![
                row.woreda.clone(),
                row.zone.clone(),
                row.period.clone(),
                format_quantity(row.administered),
                format_quantity(row.distributed),
                format!("{:.1}%", row.rate),
                row.category.label().to_string(),
            ]
        })
        .collect()
}

pub fn binding_rows(column_map: &SemanticColumnMap) -> Vec<Vec<String>> {
    column_map
        .bindings()
        .iter()
        .map(|binding| {
            vec![
                binding.canonical.clone(),
                binding.raw.clone(),
                binding.pattern.clone(),
            ]
        })
        .collect()
}

pub fn vaccine_rows(thresholds: &ThresholdConfig) -> Vec<Vec<String>> {
    thresholds
        .vaccines()
        .iter()
        .map(|vaccine| {
            let band = thresholds.utilization(vaccine);
            let extremity = thresholds.extremity(vaccine);
            vec![
                vaccine.clone(),
                format_percent(band.map(|b| b.acceptable)),
                format_percent(band.map(|b| b.unacceptable)),
                format_percent(extremity.map(|e| e.high)),
                format_percent(extremity.map(|e| e.low)),
                format_percent(thresholds.discrepancy(vaccine)),
            ]
        })
        .collect()
}

pub fn describe_filter(filter: &Filter) -> String {
    [
        ("region", &filter.region),
        ("zone", &filter.zone),
        ("woreda", &filter.woreda),
        ("period", &filter.period),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_ref().map(|v| format!("{name}={v}")))
    .collect::<Vec<_>>()
    .join(", ")
}

fn format_quantity(value: f64) -> String {
    CellValue::Number(value).to_string()
}

fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}%"),
        Some(v) => format!("{v:.2}%"),
        None => "-".to_string(),
    }
}

/// Two-column table with the title in the header row.
pub fn key_value_table(title: &str, rows: &[(String, String)]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(title), header_cell("")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), value_cell(value)]);
    }
    table
}

/// Table whose columns from `first_numeric` on are right-aligned.
pub fn grid_table<S: AsRef<str>>(
    headers: &[S],
    rows: &[Vec<String>],
    first_numeric: usize,
) -> Table {
    let mut table = Table::new();
    table.set_header(headers.iter().map(|h| header_cell(h.as_ref())));
    apply_grid_style(&mut table);
    for index in first_numeric..headers.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in rows {
        table.add_row(row.iter().map(|value| value_cell(value)));
    }
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_grid_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn value_cell(value: &str) -> Cell {
    if value == "-" || value == "0" {
        dim_cell(value)
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
