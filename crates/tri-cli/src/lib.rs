//! CLI library components for the triangulation tool.

#![deny(unsafe_code)]

pub mod logging;
pub mod summary;
pub mod types;
