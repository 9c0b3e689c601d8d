use std::fs;

use tri_core::{ReconcileOptions, reconcile};
use tri_metrics::Filter;
use tri_model::{RawTable, Role, Row};
use tri_report::{ExportOptions, InputFile, write_run_outputs};
use tri_standards::Standards;

fn tables() -> (RawTable, RawTable) {
    let mut admin = RawTable::new(
        "administered.csv",
        vec![
            "Woreda".into(),
            "Region".into(),
            "Zone".into(),
            "Period".into(),
            "BCG_Administered".into(),
        ],
    );
    admin.push_row(
        Row::new()
            .with("Woreda", "Addis Ketema")
            .with("Region", "Addis Ababa")
            .with("Zone", "Addis Ababa")
            .with("Period", "Jan-2024")
            .with("BCG_Administered", 120.0),
    );
    admin.push_row(
        Row::new()
            .with("Woreda", "Bole")
            .with("Region", "Addis Ababa")
            .with("Zone", "Addis Ababa")
            .with("Period", "Jan-2024")
            .with("BCG_Administered", 10.0),
    );

    let mut dist = RawTable::new(
        "distributed.csv",
        vec!["Woreda".into(), "Period".into(), "BCG_Distributed".into()],
    );
    dist.push_row(
        Row::new()
            .with("Woreda", "AddisKetema")
            .with("Period", "Jan-2024")
            .with("BCG_Distributed", 100.0),
    );
    (admin, dist)
}

#[test]
fn writes_every_export_and_manifest() {
    let standards = Standards::load_default().unwrap();
    let (admin, dist) = tables();
    let run = reconcile(&admin, &dist, &standards, &ReconcileOptions::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("administered.csv");
    fs::write(&input, "Woreda\nBole\n").unwrap();
    let out = dir.path().join("out");

    let written = write_run_outputs(
        &run,
        &standards,
        ExportOptions {
            output_dir: &out,
            filter: &Filter::default(),
            inputs: vec![InputFile::from_path(Role::Administered, &input).unwrap()],
        },
    )
    .unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "matched.csv",
            "unmatched_administered.csv",
            "unmatched_distributed.csv",
            "utilization.csv",
            "extremity_summary_bcg.csv",
            "extremity_summary_ipv.csv",
            "extremity_summary_measles.csv",
            "extremity_summary_penta.csv",
            "extremity_summary_rota.csv",
            "run.json",
        ]
    );

    let matched = fs::read_to_string(out.join("matched.csv")).unwrap();
    insta::assert_snapshot!(matched, @r"
    Woreda_Admin,Region_Admin,Zone_Admin,Period,Woreda_Dist,BCG_Administered,BCG_Distributed,Period_Admin
    Addis Ketema,Addis Ababa,Addis Ababa,Jan-2024,Addisketema,120,100,Jan-2024
    ");

    let utilization = fs::read_to_string(out.join("utilization.csv")).unwrap();
    let header = utilization.lines().next().unwrap();
    assert!(header.ends_with("BCG_Utilization_Rate,BCG_Utilization_Category"));
    assert!(utilization.lines().nth(1).unwrap().ends_with("120.00,Unacceptable"));

    let unmatched = fs::read_to_string(out.join("unmatched_administered.csv")).unwrap();
    assert!(unmatched.contains("Bole"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("run.json")).unwrap()).unwrap();
    assert_eq!(manifest["strategy"]["kind"], "exact");
    assert_eq!(manifest["duplicates"], "fan-out");
    assert_eq!(manifest["counts"]["matched"], 1);
    assert_eq!(manifest["counts"]["unmatched_administered"], 1);
    assert_eq!(manifest["inputs"][0]["role"], "administered");
    assert_eq!(
        manifest["inputs"][0]["sha256"].as_str().unwrap().len(),
        64
    );
    assert_eq!(manifest["outputs"].as_array().unwrap().len(), written.len() - 1);
}
