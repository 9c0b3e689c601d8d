use thiserror::Error;
use tri_map::SchemaError;
use tri_match::MatchError;

/// Errors that stop a reconciliation run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("no vaccines selected")]
    NoVaccines,
}

impl PipelineError {
    /// Missing mandatory fields when the run stopped at schema validation.
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self {
            Self::Schema(error @ SchemaError::MissingFields { .. }) => Some(error.missing_fields()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
