use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown table role '{0}' (expected 'administered' or 'distributed')")]
    UnknownRole(String),
    #[error("unknown utilization category '{0}'")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
