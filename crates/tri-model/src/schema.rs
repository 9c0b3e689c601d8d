//! Semantic column maps produced by schema inference.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// One resolved header: the canonical field and the raw header it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    pub canonical: String,
    pub raw: String,
    /// The prefix pattern that matched the cleaned header.
    pub pattern: String,
}

/// Mapping from canonical field names to the raw headers they were resolved from.
///
/// Built once per table and never mutated afterwards. Each canonical name
/// appears at most once and each raw header is bound at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticColumnMap {
    role: Role,
    bindings: Vec<ColumnBinding>,
}

impl SemanticColumnMap {
    pub fn new(role: Role, bindings: Vec<ColumnBinding>) -> Self {
        Self { role, bindings }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Bindings in the order the canonical fields were declared.
    pub fn bindings(&self) -> &[ColumnBinding] {
        &self.bindings
    }

    pub fn raw_for(&self, canonical: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.canonical == canonical)
            .map(|b| b.raw.as_str())
    }

    pub fn canonical_for(&self, raw: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|b| b.raw == raw)
            .map(|b| b.canonical.as_str())
    }

    pub fn is_bound(&self, canonical: &str) -> bool {
        self.raw_for(canonical).is_some()
    }

    /// Raw header to canonical name.
    pub fn rename_map(&self) -> BTreeMap<String, String> {
        self.bindings
            .iter()
            .map(|b| (b.raw.clone(), b.canonical.clone()))
            .collect()
    }

    pub fn bound_fields(&self) -> BTreeSet<String> {
        self.bindings.iter().map(|b| b.canonical.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
