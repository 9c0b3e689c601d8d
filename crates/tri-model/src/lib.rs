//! Core data model for vaccine data triangulation.
//!
//! Tables arrive row-oriented from the loaders ([`RawTable`]), are renamed
//! through a [`SemanticColumnMap`] into [`NormalizedRecord`]s, joined into
//! [`MatchedRecord`]s and finally augmented into [`UtilizationRecord`]s.
//! Every stage produces new values; nothing is mutated in place.

#![deny(unsafe_code)]

pub mod columns;
pub mod error;
pub mod record;
pub mod role;
pub mod schema;
pub mod summary;
pub mod table;
pub mod utilization;

pub use error::{ModelError, Result};
pub use record::{MatchedRecord, NormalizedRecord, NormalizedTable, UnmatchedRecords};
pub use role::Role;
pub use schema::{ColumnBinding, SemanticColumnMap};
pub use summary::{ExtremitySummary, ExtremitySummaryRow, SummaryGrouping};
pub use table::{CellValue, RawTable, Row};
pub use utilization::{Extremity, UtilizationCategory, UtilizationRecord};
