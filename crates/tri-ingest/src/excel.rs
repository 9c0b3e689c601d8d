//! Workbook decoding via calamine. Only the first worksheet is read.

use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};
use chrono::{Datelike, NaiveDate, NaiveTime, TimeDelta};
use tracing::debug;
use tri_model::{CellValue, RawTable};

use crate::assemble::assemble;
use crate::delimited::{MAX_FILE_SIZE, check_file_size_with_limit};
use crate::error::{IngestError, Result};

fn excel_error(path: &Path, message: impl ToString) -> IngestError {
    IngestError::Excel {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Maps a spreadsheet cell to a table cell.
pub(crate) fn convert_cell(cell: &DataType) -> CellValue {
    match cell {
        DataType::Int(i) => CellValue::Number(*i as f64),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::DateTime(serial) => match serial_to_text(*serial) {
            Some(text) => CellValue::Text(text),
            None => CellValue::Number(*serial),
        },
        DataType::String(s) => CellValue::parse(s),
        DataType::Bool(b) => CellValue::Text(b.to_string()),
        _ => CellValue::Missing,
    }
}

/// Renders a 1900-system date serial as ISO text so it compares equal to
/// the same date typed into a CSV.
///
/// A midnight on the first of a month is a reporting period and renders as
/// `YYYY-MM`; other dates render as `YYYY-MM-DD`, with `HH:MM:SS` when the
/// serial carries a time of day.
fn serial_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_signed(TimeDelta::try_days(serial.trunc() as i64)?)?;
    let seconds = ((serial.fract() * 86_400.0).round() as u32).min(86_399);
    if seconds > 0 {
        let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?;
        return Some(date.and_time(time).format("%Y-%m-%d %H:%M:%S").to_string());
    }
    let format = if date.day() == 1 { "%Y-%m" } else { "%Y-%m-%d" };
    Some(date.format(format).to_string())
}

/// Reads the first worksheet; its first row is the header.
pub fn read_excel(path: &Path) -> Result<RawTable> {
    check_file_size_with_limit(path, MAX_FILE_SIZE)?;

    let mut workbook = open_workbook_auto(path).map_err(|e| excel_error(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| excel_error(path, "workbook has no worksheets"))?
        .map_err(|e| excel_error(path, e))?;

    debug!(path = %path.display(), size = ?range.get_size(), "read worksheet");

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| convert_cell(cell).as_text())
            .collect(),
        None => {
            return Err(IngestError::EmptyTable {
                path: path.to_path_buf(),
            });
        }
    };

    let cells = rows.map(|row| row.iter().map(convert_cell).collect::<Vec<_>>());
    assemble(path, headers, cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell() {
        assert_eq!(convert_cell(&DataType::Int(12)), CellValue::Number(12.0));
        assert_eq!(convert_cell(&DataType::Float(1.5)), CellValue::Number(1.5));
        assert_eq!(
            convert_cell(&DataType::String(" Bole ".into())),
            CellValue::Text("Bole".into())
        );
        assert_eq!(
            convert_cell(&DataType::String("42".into())),
            CellValue::Number(42.0)
        );
        assert_eq!(convert_cell(&DataType::Empty), CellValue::Missing);
        assert_eq!(
            convert_cell(&DataType::Bool(true)),
            CellValue::Text("true".into())
        );
    }

    #[test]
    fn test_date_cells_render_as_iso_text() {
        assert_eq!(
            convert_cell(&DataType::DateTime(45292.0)),
            CellValue::Text("2024-01".into())
        );
        assert_eq!(
            convert_cell(&DataType::DateTime(45306.0)),
            CellValue::Text("2024-01-15".into())
        );
        assert_eq!(
            convert_cell(&DataType::DateTime(45306.5)),
            CellValue::Text("2024-01-15 12:00:00".into())
        );
        assert_eq!(convert_cell(&DataType::DateTime(-3.0)), CellValue::Number(-3.0));
    }

    #[test]
    fn test_date_period_matches_csv_period() {
        // Same month typed into a CSV and stored as a date in a workbook.
        let from_csv = CellValue::parse("2024-01");
        let from_workbook = convert_cell(&DataType::DateTime(45292.0));
        assert_eq!(from_csv.as_text(), from_workbook.as_text());
    }

    #[test]
    fn test_unreadable_workbook() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        std::io::Write::write_all(&mut file, b"not a zip archive").unwrap();
        let result = read_excel(file.path());
        assert!(matches!(result, Err(IngestError::Excel { .. })));
    }
}
