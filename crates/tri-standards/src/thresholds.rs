//! Vaccine threshold tables.
//!
//! Source files mix fraction-form (`0.90`) and percent-form (`100`) values,
//! so every table declares its unit and is scaled to percent exactly once,
//! here. Nothing downstream ever inspects a threshold's magnitude to guess
//! its unit.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedded::DEFAULT_THRESHOLDS;
use crate::error::{Result, StandardsError};

/// Declared unit of a threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdUnit {
    /// `1.0` means 100%.
    Fraction,
    /// `100` means 100%.
    Percent,
}

impl ThresholdUnit {
    /// Fraction values are rounded to 1e-9 after scaling so that `0.3`
    /// becomes exactly `30` rather than `30.000000000000004`.
    pub fn to_percent(self, value: f64) -> f64 {
        match self {
            Self::Fraction => (value * 100.0 * 1e9).round() / 1e9,
            Self::Percent => value,
        }
    }
}

/// Acceptable/unacceptable band for the three-way utilization split, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationThreshold {
    pub acceptable: f64,
    pub unacceptable: f64,
}

/// Wide high/low band used for extremity flags, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtremityThreshold {
    pub high: f64,
    pub low: f64,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct UnitTable<T> {
    unit: ThresholdUnit,
    #[serde(default)]
    thresholds: BTreeMap<String, T>,
}

#[derive(Debug, Deserialize)]
struct RawBand {
    acceptable: f64,
    unacceptable: f64,
}

#[derive(Debug, Deserialize)]
struct RawExtremity {
    high: f64,
    low: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThresholdFile {
    vaccines: Option<Vec<String>>,
    utilization: Option<UnitTable<RawBand>>,
    discrepancy: Option<UnitTable<f64>>,
    extremity: Option<UnitTable<RawExtremity>>,
}

/// Threshold configuration with every value expressed in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdConfig {
    vaccines: Vec<String>,
    utilization: BTreeMap<String, UtilizationThreshold>,
    discrepancy: BTreeMap<String, f64>,
    extremity: BTreeMap<String, ExtremityThreshold>,
}

impl ThresholdConfig {
    /// Vaccines whose columns are looked for, in reporting order.
    pub fn vaccines(&self) -> &[String] {
        &self.vaccines
    }

    pub fn utilization(&self, vaccine: &str) -> Option<&UtilizationThreshold> {
        lookup(&self.utilization, vaccine)
    }

    pub fn extremity(&self, vaccine: &str) -> Option<&ExtremityThreshold> {
        lookup(&self.extremity, vaccine)
    }

    /// Tolerated administered/distributed discrepancy in percent.
    pub fn discrepancy(&self, vaccine: &str) -> Option<f64> {
        lookup(&self.discrepancy, vaccine).copied()
    }

    /// Restricts or extends the vaccine list without touching thresholds.
    #[must_use]
    pub fn with_vaccines(mut self, vaccines: Vec<String>) -> Self {
        self.vaccines = vaccines;
        self
    }
}

fn lookup<'a, T>(table: &'a BTreeMap<String, T>, vaccine: &str) -> Option<&'a T> {
    table.get(vaccine).or_else(|| {
        table
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(vaccine))
            .map(|(_, value)| value)
    })
}

/// Loads the embedded default thresholds.
pub fn load_default_thresholds() -> Result<ThresholdConfig> {
    parse_thresholds(DEFAULT_THRESHOLDS, "embedded thresholds.toml", None)
}

/// Loads a user thresholds file; tables it omits fall back to the embedded defaults.
pub fn load_thresholds(path: &Path) -> Result<ThresholdConfig> {
    let text = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    let defaults = load_default_thresholds()?;
    parse_thresholds(&text, &path.display().to_string(), Some(&defaults))
}

/// Parses threshold TOML, scaling every table to percent.
pub fn parse_thresholds(
    text: &str,
    origin: &str,
    fallback: Option<&ThresholdConfig>,
) -> Result<ThresholdConfig> {
    let file: ThresholdFile = toml::from_str(text).map_err(|source| StandardsError::Toml {
        origin: origin.to_string(),
        source,
    })?;

    let utilization = match file.utilization {
        Some(table) => scale_utilization(table)?,
        None => fallback.map(|f| f.utilization.clone()).unwrap_or_default(),
    };
    let discrepancy = match file.discrepancy {
        Some(table) => scale_discrepancy(table)?,
        None => fallback.map(|f| f.discrepancy.clone()).unwrap_or_default(),
    };
    let extremity = match file.extremity {
        Some(table) => scale_extremity(table)?,
        None => fallback.map(|f| f.extremity.clone()).unwrap_or_default(),
    };

    let vaccines = match file.vaccines {
        Some(list) => list
            .into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>(),
        None => {
            let mut list: Vec<String> = fallback.map(|f| f.vaccines.clone()).unwrap_or_default();
            for name in utilization.keys() {
                if !list.iter().any(|v| v.eq_ignore_ascii_case(name)) {
                    list.push(name.clone());
                }
            }
            list
        }
    };
    if vaccines.is_empty() {
        return Err(StandardsError::EmptyVaccineList);
    }

    debug!(
        origin,
        vaccines = vaccines.len(),
        utilization = utilization.len(),
        extremity = extremity.len(),
        "loaded thresholds"
    );

    Ok(ThresholdConfig {
        vaccines,
        utilization,
        discrepancy,
        extremity,
    })
}

fn scale_utilization(
    table: UnitTable<RawBand>,
) -> Result<BTreeMap<String, UtilizationThreshold>> {
    let unit = table.unit;
    table
        .thresholds
        .into_iter()
        .map(|(vaccine, band)| {
            let acceptable = checked(&vaccine, "acceptable", unit.to_percent(band.acceptable))?;
            let unacceptable =
                checked(&vaccine, "unacceptable", unit.to_percent(band.unacceptable))?;
            if acceptable > unacceptable {
                return Err(StandardsError::InvalidThreshold {
                    vaccine,
                    message: format!(
                        "acceptable ({acceptable}%) exceeds unacceptable ({unacceptable}%)"
                    ),
                });
            }
            Ok((
                vaccine,
                UtilizationThreshold {
                    acceptable,
                    unacceptable,
                },
            ))
        })
        .collect()
}

fn scale_discrepancy(table: UnitTable<f64>) -> Result<BTreeMap<String, f64>> {
    let unit = table.unit;
    table
        .thresholds
        .into_iter()
        .map(|(vaccine, value)| {
            let value = checked(&vaccine, "discrepancy", unit.to_percent(value))?;
            Ok((vaccine, value))
        })
        .collect()
}

fn scale_extremity(
    table: UnitTable<RawExtremity>,
) -> Result<BTreeMap<String, ExtremityThreshold>> {
    let unit = table.unit;
    table
        .thresholds
        .into_iter()
        .map(|(vaccine, band)| {
            let high = checked(&vaccine, "high", unit.to_percent(band.high))?;
            let low = checked(&vaccine, "low", unit.to_percent(band.low))?;
            if low > high {
                return Err(StandardsError::InvalidThreshold {
                    vaccine,
                    message: format!("low ({low}%) exceeds high ({high}%)"),
                });
            }
            Ok((vaccine, ExtremityThreshold { high, low }))
        })
        .collect()
}

fn checked(vaccine: &str, field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(StandardsError::InvalidThreshold {
            vaccine: vaccine.to_string(),
            message: format!("{field} must be a non-negative number, got {value}"),
        })
    }
}
