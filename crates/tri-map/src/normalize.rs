//! Renaming raw rows into normalized records.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use tri_model::{
    CellValue, NormalizedRecord, NormalizedTable, RawTable, Role, SemanticColumnMap, columns,
};
use tri_standards::FieldRule;

use crate::error::{Result, SchemaError};
use crate::infer::{infer_schema, mandatory_fields, validate};
use crate::text::{canonicalize, title_case};

/// Infers the schema of `table`, validates it and renames every row.
///
/// Fails before producing any record when a mandatory field is unbound.
pub fn normalize_table(table: &RawTable, role: Role, rules: &[FieldRule]) -> Result<NormalizedTable> {
    if !rules.iter().any(|rule| rule.role == role) {
        return Err(SchemaError::NoRules { role });
    }

    let column_map = infer_schema(&table.columns, role, rules);
    validate(&column_map, &mandatory_fields(rules, role))?;
    Ok(apply_schema(table, column_map))
}

/// Renames `table` through an already validated column map.
pub fn apply_schema(table: &RawTable, column_map: SemanticColumnMap) -> NormalizedTable {
    let role = column_map.role();
    let renames = column_map.rename_map();

    // Unbound headers keep their raw name unless it collides with a bound canonical name.
    let mut output_columns: Vec<(String, String)> = Vec::with_capacity(table.columns.len());
    for raw in &table.columns {
        match renames.get(raw) {
            Some(canonical) => output_columns.push((raw.clone(), canonical.clone())),
            None if column_map.is_bound(raw) => {
                warn!(%role, column = %raw, "dropping unbound column shadowed by a canonical field");
            }
            None => output_columns.push((raw.clone(), raw.clone())),
        }
    }

    let geography = columns::geography_columns(role);
    let facility = columns::facility_column(role);
    let mut blank_keys = 0usize;

    let records: Vec<NormalizedRecord> = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| {
            let mut cells = BTreeMap::new();
            for (raw, name) in &output_columns {
                let value = row.get(raw).cloned().unwrap_or(CellValue::Missing);
                let value = if geography.contains(&name.as_str()) {
                    tidy_geography(value)
                } else {
                    value
                };
                cells.insert(name.clone(), value);
            }

            let entity_key = cells
                .get(facility)
                .map(|cell| canonicalize(&cell.as_text()))
                .unwrap_or_default();
            if entity_key.is_empty() {
                blank_keys += 1;
                debug!(%role, row_index, "row has no usable facility name");
            }

            NormalizedRecord {
                row_index,
                entity_key,
                cells,
            }
        })
        .collect();

    if blank_keys > 0 {
        warn!(%role, rows = blank_keys, "rows without a facility name will not match");
    }
    info!(
        %role,
        source = %table.source,
        records = records.len(),
        bound = column_map.len(),
        "normalized table"
    );

    NormalizedTable {
        role,
        source: table.source.clone(),
        columns: output_columns.into_iter().map(|(_, name)| name).collect(),
        column_map,
        records,
    }
}

fn tidy_geography(value: CellValue) -> CellValue {
    match value {
        CellValue::Text(text) => {
            let tidy = title_case(&text);
            if tidy.is_empty() {
                CellValue::Missing
            } else {
                CellValue::Text(tidy)
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_model::Row;
    use tri_standards::{load_default_fields, load_default_thresholds};

    fn rules(role: Role) -> Vec<FieldRule> {
        let thresholds = load_default_thresholds().unwrap();
        load_default_fields()
            .unwrap()
            .rules_for(role, thresholds.vaccines())
    }

    fn admin_table() -> RawTable {
        let mut table = RawTable::new(
            "admin.csv",
            vec![
                "Woreda".into(),
                "Region".into(),
                "Zone".into(),
                "Period".into(),
                "BCG Administered".into(),
                "Remarks".into(),
            ],
        );
        table.push_row(
            Row::new()
                .with("Woreda", "addis ketema")
                .with("Region", "ADDIS ABABA")
                .with("Zone", "Addis Ababa")
                .with("Period", "Jan-2024")
                .with("BCG Administered", 120.0)
                .with("Remarks", "ok"),
        );
        table
    }

    #[test]
    fn renames_and_derives_entity_key() {
        let table = normalize_table(&admin_table(), Role::Administered, &rules(Role::Administered))
            .unwrap();
        assert_eq!(
            table.columns,
            vec![
                "Woreda_Admin",
                "Region_Admin",
                "Zone_Admin",
                "Period_Admin",
                "BCG_Administered",
                "Remarks"
            ]
        );
        let record = &table.records[0];
        assert_eq!(record.entity_key, "addisketema");
        assert_eq!(record.text("Woreda_Admin"), "Addis Ketema");
        assert_eq!(record.text("Region_Admin"), "Addis Ababa");
        assert_eq!(record.get("BCG_Administered"), Some(&CellValue::Number(120.0)));
        assert_eq!(record.text("Remarks"), "ok");
    }

    #[test]
    fn missing_region_stops_before_renaming() {
        let mut table = RawTable::new(
            "admin.csv",
            vec!["Woreda".into(), "Zone".into(), "Period".into()],
        );
        table.push_row(Row::new().with("Woreda", "Bole").with("Period", "Jan"));
        let err = normalize_table(&table, Role::Administered, &rules(Role::Administered))
            .unwrap_err();
        assert_eq!(err.missing_fields(), ["Region_Admin"]);
    }

    #[test]
    fn blank_facility_gets_empty_key() {
        let mut table = RawTable::new("dist.csv", vec!["Woreda".into(), "Period".into()]);
        table.push_row(Row::new().with("Woreda", " - ").with("Period", "Jan"));
        let normalized =
            normalize_table(&table, Role::Distributed, &rules(Role::Distributed)).unwrap();
        assert_eq!(normalized.records[0].entity_key, "");
    }

    #[test]
    fn no_rules_for_role_is_an_error() {
        let admin_only = rules(Role::Administered);
        let err = normalize_table(&admin_table(), Role::Distributed, &admin_only).unwrap_err();
        assert_eq!(err, SchemaError::NoRules { role: Role::Distributed });
    }
}
