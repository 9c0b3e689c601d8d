use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("fuzzy threshold must lie between 0 and 100, got {value}")]
    InvalidThreshold { value: f64 },
}

pub type Result<T> = std::result::Result<T, MatchError>;
