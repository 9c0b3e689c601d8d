//! Schema inference and facility-name canonicalization.
//!
//! Raw headers are matched against the declarative field table from
//! `tri-standards`, mandatory fields are validated, and every row is renamed
//! into a [`tri_model::NormalizedRecord`] keyed by its canonicalized
//! facility name.

#![deny(unsafe_code)]

pub mod error;
pub mod infer;
pub mod normalize;
pub mod text;

pub use error::{Result, SchemaError};
pub use infer::{infer_schema, mandatory_fields, validate};
pub use normalize::{apply_schema, normalize_table};
pub use text::{canonicalize, clean_header, title_case};
