#![allow(dead_code)]

use tri_metrics::compute_utilization;
use tri_model::{CellValue, MatchedRecord, UtilizationRecord};

/// (region, zone, woreda, period, bcg administered, bcg distributed)
pub type Row<'a> = (&'a str, &'a str, &'a str, &'a str, f64, f64);

pub fn records(rows: &[Row<'_>]) -> Vec<UtilizationRecord> {
    let matched: Vec<MatchedRecord> = rows
        .iter()
        .enumerate()
        .map(|(index, (region, zone, woreda, period, admin, dist))| MatchedRecord {
            entity_key: woreda.to_lowercase(),
            period: period.to_string(),
            admin_row: index,
            dist_row: index,
            cells: [
                ("Region_Admin", CellValue::from(*region)),
                ("Zone_Admin", CellValue::from(*zone)),
                ("Woreda_Admin", CellValue::from(*woreda)),
                ("Period", CellValue::from(*period)),
                ("BCG_Administered", CellValue::from(*admin)),
                ("BCG_Distributed", CellValue::from(*dist)),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        })
        .collect();
    compute_utilization(&matched, &["BCG".to_string(), "HPV".to_string()])
}

pub fn fixture() -> Vec<UtilizationRecord> {
    records(&[
        ("Oromia", "Jimma", "Jimma Town", "Jan", 130.0, 100.0),
        ("Oromia", "Jimma", "Seka", "Jan", 20.0, 100.0),
        ("Oromia", "Jimma", "Seka", "Feb", 70.0, 100.0),
        ("Oromia", "Arsi", "Asella", "Jan", 90.0, 100.0),
        ("Amhara", "Gondar", "Dabat", "Jan", 10.0, 0.0),
        ("Amhara", "Gondar", "Dabat", "Feb", 0.0, 0.0),
    ])
}
