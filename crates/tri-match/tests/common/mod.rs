#![allow(dead_code)]

use tri_map::normalize_table;
use tri_model::{NormalizedTable, RawTable, Role, Row};
use tri_standards::{load_default_fields, load_default_thresholds};

pub fn normalize(table: &RawTable, role: Role) -> NormalizedTable {
    let vaccines = load_default_thresholds().unwrap().vaccines().to_vec();
    let rules = load_default_fields().unwrap().rules_for(role, &vaccines);
    normalize_table(table, role, &rules).unwrap()
}

pub fn admin_table(rows: &[(&str, &str, f64)]) -> NormalizedTable {
    let mut table = RawTable::new(
        "administered.csv",
        vec![
            "Woreda".into(),
            "Region".into(),
            "Zone".into(),
            "Period".into(),
            "BCG_Administered".into(),
        ],
    );
    for (woreda, period, doses) in rows {
        table.push_row(
            Row::new()
                .with("Woreda", *woreda)
                .with("Region", "Oromia")
                .with("Zone", "Jimma")
                .with("Period", *period)
                .with("BCG_Administered", *doses),
        );
    }
    normalize(&table, Role::Administered)
}

pub fn dist_table(rows: &[(&str, &str, f64)]) -> NormalizedTable {
    let mut table = RawTable::new(
        "distributed.csv",
        vec!["Woreda".into(), "Period".into(), "BCG_Distributed".into()],
    );
    for (woreda, period, doses) in rows {
        table.push_row(
            Row::new()
                .with("Woreda", *woreda)
                .with("Period", *period)
                .with("BCG_Distributed", *doses),
        );
    }
    normalize(&table, Role::Distributed)
}
