//! Records flowing through normalization and matching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns;
use crate::role::Role;
use crate::schema::SemanticColumnMap;
use crate::table::CellValue;

/// Text of a cell, or empty when absent.
fn cell_text(cells: &BTreeMap<String, CellValue>, column: &str) -> String {
    cells.get(column).map(CellValue::as_text).unwrap_or_default()
}

/// A raw row after header renaming, with its canonical facility key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Index of the source row in the raw table.
    pub row_index: usize,
    /// Canonicalized facility name used as the join key.
    pub entity_key: String,
    pub cells: BTreeMap<String, CellValue>,
}

impl NormalizedRecord {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn text(&self, column: &str) -> String {
        cell_text(&self.cells, column)
    }

    /// Facility name as written in the source.
    pub fn facility_name(&self, role: Role) -> String {
        self.text(columns::facility_column(role))
    }

    /// Reporting period, trimmed; this is the period half of the join key.
    pub fn period(&self, role: Role) -> String {
        self.text(columns::period_column(role)).trim().to_string()
    }
}

/// All records of one side after schema normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTable {
    pub role: Role,
    pub source: String,
    /// Column names after renaming, in source order.
    pub columns: Vec<String>,
    pub column_map: SemanticColumnMap,
    pub records: Vec<NormalizedRecord>,
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// One administered record paired with one distributed record.
///
/// Carries the union of both sides' fields; the distributed period is
/// dropped and the administered period is copied to `Period`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedRecord {
    pub entity_key: String,
    pub period: String,
    pub admin_row: usize,
    pub dist_row: usize,
    pub cells: BTreeMap<String, CellValue>,
}

impl MatchedRecord {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn text(&self, column: &str) -> String {
        cell_text(&self.cells, column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

/// Records from either side that did not participate in any match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnmatchedRecords {
    pub administered: Vec<NormalizedRecord>,
    pub distributed: Vec<NormalizedRecord>,
}

impl UnmatchedRecords {
    pub fn side(&self, role: Role) -> &[NormalizedRecord] {
        match role {
            Role::Administered => &self.administered,
            Role::Distributed => &self.distributed,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.administered.is_empty() && self.distributed.is_empty()
    }
}
