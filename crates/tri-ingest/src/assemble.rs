//! Turns a decoded header and cell grid into a [`RawTable`].

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, warn};
use tri_model::{CellValue, RawTable, Row};

use crate::error::{IngestError, Result};

/// Headers left behind by spreadsheet index columns or trailing delimiters.
pub(crate) fn is_artifact_header(header: &str) -> bool {
    let trimmed = header.trim();
    trimmed.is_empty() || trimmed.starts_with("Unnamed")
}

/// Builds a table from headers and rows of cells.
///
/// Artifact columns are dropped, repeated headers get a `.N` suffix, and
/// rows with no non-missing cell are skipped.
pub(crate) fn assemble<I>(path: &Path, headers: Vec<String>, rows: I) -> Result<RawTable>
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::NoHeaderDetected {
            path: path.to_path_buf(),
        });
    }

    let mut kept: Vec<(usize, String)> = Vec::with_capacity(headers.len());
    let mut seen = BTreeSet::new();
    for (index, header) in headers.into_iter().enumerate() {
        if is_artifact_header(&header) {
            warn!(path = %path.display(), column = index, header = %header, "dropping artifact column");
            continue;
        }
        let mut name = header.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{header}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        kept.push((index, name));
    }

    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mut table = RawTable::new(source, kept.iter().map(|(_, name)| name.clone()).collect());

    let mut blank = 0usize;
    for cells in rows {
        let mut row = Row::new();
        let mut any = false;
        for (index, name) in &kept {
            let value = cells.get(*index).cloned().unwrap_or(CellValue::Missing);
            any |= !value.is_missing();
            row.cells.insert(name.clone(), value);
        }
        if any {
            table.push_row(row);
        } else {
            blank += 1;
        }
    }

    if table.is_empty() {
        return Err(IngestError::EmptyTable {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        blank_rows = blank,
        "assembled table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::parse(v)).collect()
    }

    #[test]
    fn test_artifact_headers() {
        assert!(is_artifact_header(""));
        assert!(is_artifact_header("  "));
        assert!(is_artifact_header("Unnamed: 0"));
        assert!(!is_artifact_header("Woreda"));
    }

    #[test]
    fn test_assemble_drops_artifacts_and_blank_rows() {
        let headers = vec!["Unnamed: 0".into(), "Woreda".into(), "BCG".into(), "".into()];
        let rows = vec![
            text(&["0", "Addis Ketema", "120", ""]),
            text(&["", "", "", ""]),
            text(&["1", "Bole", "80"]),
        ];
        let table = assemble(Path::new("dir/admin.csv"), headers, rows).unwrap();
        assert_eq!(table.source, "admin.csv");
        assert_eq!(table.columns, vec!["Woreda", "BCG"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("BCG"), Some(&CellValue::Number(80.0)));
    }

    #[test]
    fn test_assemble_suffixes_repeated_headers() {
        let headers = vec!["Period".into(), "Period".into(), "Period".into()];
        let rows = vec![text(&["Jan", "Feb", "Mar"])];
        let table = assemble(Path::new("x.csv"), headers, rows).unwrap();
        assert_eq!(table.columns, vec!["Period", "Period.1", "Period.2"]);
    }

    #[test]
    fn test_assemble_empty_table() {
        let headers = vec!["Woreda".into()];
        let result = assemble(Path::new("x.csv"), headers, Vec::<Vec<CellValue>>::new());
        assert!(matches!(result, Err(IngestError::EmptyTable { .. })));
    }

    #[test]
    fn test_assemble_without_header() {
        let result = assemble(Path::new("x.csv"), vec![" ".into()], vec![text(&["1"])]);
        assert!(matches!(result, Err(IngestError::NoHeaderDetected { .. })));
    }
}
