//! Binding raw headers to canonical fields.

use std::collections::BTreeSet;

use tracing::debug;
use tri_model::{ColumnBinding, Role, SemanticColumnMap};
use tri_standards::FieldRule;

use crate::error::{Result, SchemaError};
use crate::text::clean_header;

/// Resolves raw headers against an ordered rule list.
///
/// Rules are visited in declared order. For each rule the headers are
/// scanned in source order and the first one whose cleaned form starts with
/// any of the rule's prefixes is bound, unless an earlier rule already took
/// it. The result depends only on `columns` and `rules`.
pub fn infer_schema(columns: &[String], role: Role, rules: &[FieldRule]) -> SemanticColumnMap {
    let cleaned: Vec<String> = columns.iter().map(|c| clean_header(c)).collect();
    let mut taken: BTreeSet<usize> = BTreeSet::new();
    let mut bindings = Vec::new();

    for rule in rules.iter().filter(|rule| rule.role == role) {
        let hit = cleaned.iter().enumerate().find_map(|(index, header)| {
            if taken.contains(&index) {
                return None;
            }
            rule.prefixes
                .iter()
                .find(|prefix| !prefix.is_empty() && header.starts_with(prefix.as_str()))
                .map(|prefix| (index, prefix.clone()))
        });

        if let Some((index, pattern)) = hit {
            taken.insert(index);
            debug!(
                %role,
                canonical = %rule.canonical,
                raw = %columns[index],
                %pattern,
                "bound column"
            );
            bindings.push(ColumnBinding {
                canonical: rule.canonical.clone(),
                raw: columns[index].clone(),
                pattern,
            });
        }
    }

    SemanticColumnMap::new(role, bindings)
}

/// Fails with every mandatory field the map left unbound.
pub fn validate<S: AsRef<str>>(map: &SemanticColumnMap, mandatory: &[S]) -> Result<()> {
    let missing: Vec<String> = mandatory
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| !map.is_bound(field))
        .map(str::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingFields {
            role: map.role(),
            missing,
        })
    }
}

/// Mandatory canonical names among `rules` for `role`, in declared order.
pub fn mandatory_fields(rules: &[FieldRule], role: Role) -> Vec<&str> {
    rules
        .iter()
        .filter(|rule| rule.role == role && rule.mandatory)
        .map(|rule| rule.canonical.as_str())
        .collect()
}
