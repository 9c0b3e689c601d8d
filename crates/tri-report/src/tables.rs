//! CSV exports of record sets and summaries.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use tri_metrics::categorize;
use tri_model::{
    CellValue, ExtremitySummary, MatchedRecord, NormalizedRecord, Role, SummaryGrouping,
    UtilizationRecord, columns,
};
use tri_standards::ThresholdConfig;

use crate::common::{ensure_parent_dir, matched_lead_columns, ordered_header, side_lead_columns};

/// Writes a header and string rows as CSV.
pub fn write_records_csv<W, I>(writer: W, header: &[String], rows: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = Vec<String>>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(header).context("write CSV header")?;
    for row in rows {
        csv.write_record(&row).context("write CSV row")?;
    }
    csv.flush().context("flush CSV")?;
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    ensure_parent_dir(path)?;
    File::create(path).with_context(|| format!("create {}", path.display()))
}

fn cell_row(cells: &BTreeMap<String, CellValue>, header: &[String]) -> Vec<String> {
    header
        .iter()
        .map(|name| cells.get(name).map(CellValue::as_text).unwrap_or_default())
        .collect()
}

fn all_columns<'a, I>(cell_maps: I) -> Vec<&'a String>
where
    I: IntoIterator<Item = &'a BTreeMap<String, CellValue>>,
{
    let mut names: Vec<&String> = cell_maps.into_iter().flat_map(|cells| cells.keys()).collect();
    names.sort();
    names.dedup();
    names
}

pub fn write_matched<W: Write>(writer: W, records: &[MatchedRecord]) -> Result<()> {
    let header = ordered_header(
        all_columns(records.iter().map(|r| &r.cells)),
        &matched_lead_columns(),
    );
    write_records_csv(writer, &header, records.iter().map(|r| cell_row(&r.cells, &header)))
}

pub fn write_unmatched<W: Write>(writer: W, role: Role, records: &[NormalizedRecord]) -> Result<()> {
    let header = ordered_header(
        all_columns(records.iter().map(|r| &r.cells)),
        &side_lead_columns(role),
    );
    write_records_csv(writer, &header, records.iter().map(|r| cell_row(&r.cells, &header)))
}

/// Matched cells followed by a rate and category column per vaccine that
/// has at least one rate. Records without a rate leave both blank.
pub fn write_utilization<W: Write>(
    writer: W,
    records: &[UtilizationRecord],
    vaccines: &[String],
    thresholds: &ThresholdConfig,
) -> Result<()> {
    let mut header = ordered_header(
        all_columns(records.iter().map(|r| &r.record.cells)),
        &matched_lead_columns(),
    );
    let rated: Vec<&String> = vaccines
        .iter()
        .filter(|v| records.iter().any(|r| r.rate(v).is_some()))
        .collect();
    for vaccine in &rated {
        header.push(columns::rate_column(vaccine));
        header.push(columns::category_column(vaccine));
    }
    let cell_columns = header.len() - rated.len() * 2;

    let rows = records.iter().map(|record| {
        let mut row = cell_row(&record.record.cells, &header[..cell_columns]);
        for vaccine in &rated {
            match record.rate(vaccine) {
                Some(rate) => {
                    row.push(format!("{rate:.2}"));
                    row.push(categorize(rate, vaccine, thresholds).to_string());
                }
                None => {
                    row.push(String::new());
                    row.push(String::new());
                }
            }
        }
        row
    });
    write_records_csv(writer, &header, rows)
}

/// `Region[,Zone],total_facilities,high_extremity_count,low_extremity_count`.
pub fn write_extremity_summary<W: Write>(writer: W, summary: &ExtremitySummary) -> Result<()> {
    let by_zone = summary.grouping == SummaryGrouping::RegionZone;
    let mut header = vec!["Region".to_string()];
    if by_zone {
        header.push("Zone".to_string());
    }
    header.extend(
        ["total_facilities", "high_extremity_count", "low_extremity_count"].map(String::from),
    );

    let rows = summary.rows.iter().map(|row| {
        let mut out = vec![row.region.clone()];
        if by_zone {
            out.push(row.zone.clone().unwrap_or_default());
        }
        out.push(row.total_facilities.to_string());
        out.push(row.high_extreme_count.to_string());
        out.push(row.low_extreme_count.to_string());
        out
    });
    write_records_csv(writer, &header, rows)
}

/// Creates `path` (and its parent) and hands the file to `write`.
pub fn write_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(File) -> Result<()>,
{
    let file = create(path)?;
    write(file).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), "wrote export");
    Ok(())
}
