//! Loading administered/distributed source files into raw tables.
//!
//! Both CSV and workbook inputs end up as a [`RawTable`] whose column order
//! is the source header order. Header spelling is left untouched; schema
//! inference happens downstream.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tri_ingest::load_table;
//!
//! let admin = load_table(Path::new("data/administered.xlsx"), None)?;
//! ```

mod assemble;
mod delimited;
mod error;
mod excel;
mod format;

use std::path::Path;

use tracing::info;
use tri_model::RawTable;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use delimited::{MAX_FILE_SIZE, check_file_size_with_limit, read_csv, validate_encoding};
pub use excel::read_excel;
pub use format::InputFormat;

/// Loads a table, choosing the decoder from `format` or the file extension.
pub fn load_table(path: &Path, format: Option<InputFormat>) -> Result<RawTable> {
    let format = match format {
        Some(format) => format,
        None => InputFormat::from_path(path)?,
    };
    let table = match format {
        InputFormat::Csv => read_csv(path)?,
        InputFormat::Excel => read_excel(path)?,
    };
    info!(
        path = %path.display(),
        %format,
        rows = table.len(),
        columns = table.columns.len(),
        "loaded table"
    );
    Ok(table)
}
