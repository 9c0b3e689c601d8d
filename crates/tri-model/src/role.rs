use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Which side of the triangulation a table comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Doses given to patients, reported by facilities.
    Administered,
    /// Doses shipped to facilities, reported by the supply chain.
    Distributed,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Administered, Role::Distributed];

    /// Suffix used on canonical column names (`Woreda_Admin`, `Woreda_Dist`).
    pub fn column_suffix(self) -> &'static str {
        match self {
            Self::Administered => "Admin",
            Self::Distributed => "Dist",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Administered => "administered",
            Self::Distributed => "distributed",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administered" => Ok(Self::Administered),
            "dist" | "distributed" => Ok(Self::Distributed),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}
