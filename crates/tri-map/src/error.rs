use thiserror::Error;
use tri_model::Role;

/// Schema inference failures. Any of these stops the run before matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{role} table is missing mandatory fields: {}", missing.join(", "))]
    MissingFields { role: Role, missing: Vec<String> },

    #[error("no field rules configured for the {role} table")]
    NoRules { role: Role },
}

impl SchemaError {
    /// Canonical names that could not be bound, in declared order.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::MissingFields { missing, .. } => missing,
            Self::NoRules { .. } => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
