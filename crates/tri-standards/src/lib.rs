//! Configuration for vaccine data triangulation.
//!
//! Two tables drive the engine and both ship embedded in the binary:
//!
//! - **Thresholds** (`data/thresholds.toml`): vaccine list, utilization
//!   bands, discrepancy tolerances and extremity bands. Each table declares
//!   its unit; everything is held in percent after loading.
//! - **Fields** (`data/fields.toml`): canonical field names with the ordered
//!   header prefixes that bind them during schema inference.
//!
//! A thresholds file supplied at runtime replaces the embedded tables it
//! defines and inherits the rest.

#![deny(unsafe_code)]

pub mod embedded;
pub mod error;
pub mod fields;
pub mod thresholds;

use std::path::Path;

pub use error::{Result, StandardsError};
pub use fields::{FieldCatalog, FieldRule, VaccineFieldTemplate, load_default_fields};
pub use thresholds::{
    ExtremityThreshold, ThresholdConfig, ThresholdUnit, UtilizationThreshold,
    load_default_thresholds, load_thresholds,
};

/// Everything the engine needs to know up front.
#[derive(Debug, Clone)]
pub struct Standards {
    pub thresholds: ThresholdConfig,
    pub fields: FieldCatalog,
}

impl Standards {
    /// Embedded thresholds and field table.
    pub fn load_default() -> Result<Self> {
        Ok(Self {
            thresholds: load_default_thresholds()?,
            fields: load_default_fields()?,
        })
    }

    /// Embedded field table with thresholds from `path` (when given).
    pub fn load(thresholds_path: Option<&Path>) -> Result<Self> {
        let thresholds = match thresholds_path {
            Some(path) => load_thresholds(path)?,
            None => load_default_thresholds()?,
        };
        Ok(Self {
            thresholds,
            fields: load_default_fields()?,
        })
    }

    pub fn vaccines(&self) -> &[String] {
        self.thresholds.vaccines()
    }
}
