//! Declarative table of canonical fields and their header prefixes.

use std::collections::BTreeSet;

use serde::Deserialize;
use tri_model::{Role, columns};

use crate::embedded::DEFAULT_FIELDS;
use crate::error::{Result, StandardsError};

/// Placeholder replaced by the (lowercased) vaccine name in vaccine prefixes.
pub const VACCINE_PLACEHOLDER: &str = "{vaccine}";

/// A canonical field, the role it belongs to, and the ordered prefixes that bind it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldRule {
    pub canonical: String,
    pub role: Role,
    #[serde(default)]
    pub mandatory: bool,
    pub prefixes: Vec<String>,
}

/// Prefix template instantiated once per configured vaccine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VaccineFieldTemplate {
    pub role: Role,
    pub prefixes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldFile {
    #[serde(default)]
    fields: Vec<FieldRule>,
    #[serde(default)]
    vaccine_fields: Vec<VaccineFieldTemplate>,
}

/// The full field table: fixed geography/period fields plus vaccine templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<FieldRule>,
    vaccine_fields: Vec<VaccineFieldTemplate>,
}

impl FieldCatalog {
    /// Rules for one role in resolution order: fixed fields as declared, then
    /// one quantity field per vaccine.
    ///
    /// Vaccine quantity fields are never mandatory; a vaccine absent from a
    /// file simply yields no rate.
    pub fn rules_for(&self, role: Role, vaccines: &[String]) -> Vec<FieldRule> {
        let mut rules: Vec<FieldRule> = self
            .fields
            .iter()
            .filter(|rule| rule.role == role)
            .cloned()
            .collect();

        for vaccine in vaccines {
            let needle = vaccine.trim().to_lowercase();
            let prefixes: Vec<String> = self
                .vaccine_fields
                .iter()
                .filter(|template| template.role == role)
                .flat_map(|template| template.prefixes.iter())
                .map(|prefix| prefix.replace(VACCINE_PLACEHOLDER, &needle))
                .collect();
            if prefixes.is_empty() {
                continue;
            }
            rules.push(FieldRule {
                canonical: columns::quantity_column(vaccine, role),
                role,
                mandatory: false,
                prefixes,
            });
        }
        rules
    }

    /// Canonical names that must be bound for a role.
    pub fn mandatory_fields(&self, role: Role) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|rule| rule.role == role && rule.mandatory)
            .map(|rule| rule.canonical.as_str())
            .collect()
    }
}

/// Loads the embedded field table.
pub fn load_default_fields() -> Result<FieldCatalog> {
    parse_fields(DEFAULT_FIELDS, "embedded fields.toml")
}

/// Parses and validates a field table.
pub fn parse_fields(text: &str, origin: &str) -> Result<FieldCatalog> {
    let file: FieldFile = toml::from_str(text).map_err(|source| StandardsError::Toml {
        origin: origin.to_string(),
        source,
    })?;

    let mut seen = BTreeSet::new();
    for rule in &file.fields {
        if rule.prefixes.iter().all(|p| p.trim().is_empty()) {
            return Err(StandardsError::InvalidFieldRule {
                canonical: rule.canonical.clone(),
                message: "no prefixes declared".to_string(),
            });
        }
        if !seen.insert(rule.canonical.clone()) {
            return Err(StandardsError::InvalidFieldRule {
                canonical: rule.canonical.clone(),
                message: "declared more than once".to_string(),
            });
        }
    }
    for template in &file.vaccine_fields {
        if let Some(prefix) = template
            .prefixes
            .iter()
            .find(|p| !p.contains(VACCINE_PLACEHOLDER))
        {
            return Err(StandardsError::InvalidFieldRule {
                canonical: format!("{{vaccine}}_{}", template.role),
                message: format!("prefix '{prefix}' lacks the {VACCINE_PLACEHOLDER} placeholder"),
            });
        }
    }

    Ok(FieldCatalog {
        fields: file.fields,
        vaccine_fields: file.vaccine_fields,
    })
}
