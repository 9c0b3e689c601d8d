//! Shared helpers for export writers.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sha2::Digest;
use tri_model::{Role, columns};

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Ensure the output directory exists and return it.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(sha2::Sha256::digest(bytes))
}

pub fn file_sha256(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    Ok(sha256_hex(&bytes))
}

/// Leading columns of a matched or utilization export.
pub fn matched_lead_columns() -> Vec<&'static str> {
    let mut lead = columns::geography_columns(Role::Administered).to_vec();
    lead.push(columns::PERIOD);
    lead.extend(columns::geography_columns(Role::Distributed));
    lead
}

/// Leading columns of one side's unmatched export.
pub fn side_lead_columns(role: Role) -> Vec<&'static str> {
    let mut lead = columns::geography_columns(role).to_vec();
    lead.push(columns::period_column(role));
    lead
}

/// `lead` columns that are present, in order, then every other present column sorted.
pub fn ordered_header<'a, I>(present: I, lead: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let present: BTreeSet<&String> = present.into_iter().collect();
    let mut header: Vec<String> = lead
        .iter()
        .filter(|name| present.iter().any(|p| p.as_str() == **name))
        .map(|name| (*name).to_string())
        .collect();
    header.extend(
        present
            .into_iter()
            .filter(|name| !lead.contains(&name.as_str()))
            .cloned(),
    );
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_puts_lead_columns_first() {
        let present: Vec<String> = ["Remarks", "BCG_Administered", "Period", "Woreda_Admin"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let header = ordered_header(&present, &matched_lead_columns());
        assert_eq!(
            header,
            vec!["Woreda_Admin", "Period", "BCG_Administered", "Remarks"]
        );
    }

    #[test]
    fn sha256_of_known_input() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
