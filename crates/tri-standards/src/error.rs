//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading thresholds or field tables.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    /// Configuration file could not be read.
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for the expected shape.
    #[error("failed to parse TOML {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// A threshold value is negative, not finite, or the band is inverted.
    #[error("invalid threshold for {vaccine}: {message}")]
    InvalidThreshold { vaccine: String, message: String },

    /// A field rule has no prefixes or a duplicate canonical name.
    #[error("invalid field rule '{canonical}': {message}")]
    InvalidFieldRule { canonical: String, message: String },

    /// No vaccines configured.
    #[error("vaccine list is empty")]
    EmptyVaccineList,
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, StandardsError>;
