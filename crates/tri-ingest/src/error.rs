//! Error types for table loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while decoding an input file into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Encoding the CSV reader cannot handle.
    #[error("unsupported encoding {encoding} in {path} (save as UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Extension does not map to a known input format.
    #[error("unsupported input format for {path}; expected .csv, .xlsx, .xlsm or .xls")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Malformed CSV record.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Workbook could not be opened or its first sheet read.
    #[error("failed to read workbook {path}: {message}")]
    Excel { path: PathBuf, message: String },

    /// No header row could be found.
    #[error("could not detect header row in {path}")]
    NoHeaderDetected { path: PathBuf },

    /// Header present but no data rows.
    #[error("table has no data rows: {path}")]
    EmptyTable { path: PathBuf },
}

impl IngestError {
    pub(crate) fn open(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
