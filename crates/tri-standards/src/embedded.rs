//! Defaults embedded at compile time.

/// Vaccine list, utilization/discrepancy/extremity thresholds.
pub const DEFAULT_THRESHOLDS: &str = include_str!("../data/thresholds.toml");

/// Canonical field pattern table.
pub const DEFAULT_FIELDS: &str = include_str!("../data/fields.toml");
