//! Run-time choices for the record matcher.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Similarity score a fuzzy pair must reach when none is configured.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 85.0;

/// How administered facilities are paired with distributed ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Equal `entity_key`.
    #[default]
    Exact,
    /// Greedy name resolution with a minimum similarity (0-100).
    Fuzzy { threshold: f64 },
}

impl MatchStrategy {
    pub fn fuzzy() -> Self {
        Self::Fuzzy {
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy { .. } => "fuzzy",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Fuzzy { threshold } if !(0.0..=100.0).contains(&threshold) => {
                Err(MatchError::InvalidThreshold { value: threshold })
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Fuzzy { threshold } => write!(f, "fuzzy (threshold {threshold})"),
        }
    }
}

/// What to do with several rows sharing one (facility, period) on a side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// Every pair within a (facility, period) group becomes a match.
    #[default]
    FanOut,
    /// Only the first row per side and (facility, period) takes part.
    KeepFirst,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FanOut => "fan-out",
            Self::KeepFirst => "keep-first",
        })
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fan-out" | "fanout" => Ok(Self::FanOut),
            "keep-first" | "first" => Ok(Self::KeepFirst),
            other => Err(format!("unknown duplicate policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOptions {
    pub strategy: MatchStrategy,
    pub duplicates: DuplicatePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_bounds() {
        assert!(MatchStrategy::fuzzy().validate().is_ok());
        assert!(MatchStrategy::Fuzzy { threshold: 0.0 }.validate().is_ok());
        assert!(MatchStrategy::Fuzzy { threshold: 100.0 }.validate().is_ok());
        assert_eq!(
            MatchStrategy::Fuzzy { threshold: 101.0 }.validate(),
            Err(MatchError::InvalidThreshold { value: 101.0 })
        );
        assert!(MatchStrategy::Fuzzy { threshold: f64::NAN }.validate().is_err());
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("fan-out".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::FanOut);
        assert_eq!("Keep-First".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::KeepFirst);
        assert!("merge".parse::<DuplicatePolicy>().is_err());
    }
}
