//! End-to-end reconciliation of administered and distributed tables.

#![deny(unsafe_code)]

pub mod error;
pub mod options;
pub mod pipeline;

pub use error::{PipelineError, Result};
pub use options::ReconcileOptions;
pub use pipeline::{Reconciliation, normalize, reconcile};
