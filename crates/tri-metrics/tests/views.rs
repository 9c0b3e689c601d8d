mod common;

use common::{fixture, records};
use tri_metrics::{
    BreakdownLevel, Filter, FilterOptions, category_counts, extremity_counts, facility_view,
    geographic_breakdown, scorecard, summarize_extremities,
};
use tri_model::{SummaryGrouping, UtilizationCategory};
use tri_standards::load_default_thresholds;

#[test]
fn zero_distributed_rate_is_clamped() {
    let records = records(&[("Addis Ababa", "Addis Ababa", "Addis Ketema", "Jan-2024", 120.0, 0.0)]);
    assert_eq!(records[0].rate("BCG"), Some(1000.0));
}

#[test]
fn unconfigured_vaccine_without_columns_has_no_rate() {
    let records = fixture();
    assert!(records.iter().all(|r| r.rate("HPV").is_none()));
}

#[test]
fn summary_by_region_counts_distinct_facilities() {
    let thresholds = load_default_thresholds().unwrap();
    let records = fixture();
    let filter = Filter::default();
    let summary = summarize_extremities(
        filter.apply(&records),
        "BCG",
        &thresholds,
        filter.summary_grouping(),
    );
    assert_eq!(summary.grouping, SummaryGrouping::Region);

    let lines: Vec<String> = summary
        .rows
        .iter()
        .map(|row| {
            format!(
                "{} total={} high={} low={}",
                row.region, row.total_facilities, row.high_extreme_count, row.low_extreme_count
            )
        })
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    Amhara total=1 high=1 low=1
    Oromia total=3 high=1 low=1
    ");
}

#[test]
fn summary_by_region_and_zone_under_region_filter() {
    let thresholds = load_default_thresholds().unwrap();
    let records = fixture();
    let filter = Filter {
        region: Some("Oromia".into()),
        ..Filter::default()
    };
    let summary = summarize_extremities(
        filter.apply(&records),
        "BCG",
        &thresholds,
        filter.summary_grouping(),
    );
    let groups: Vec<(String, Option<String>, usize)> = summary
        .rows
        .iter()
        .map(|r| (r.region.clone(), r.zone.clone(), r.total_facilities))
        .collect();
    assert_eq!(
        groups,
        vec![
            ("Oromia".into(), Some("Arsi".into()), 1),
            ("Oromia".into(), Some("Jimma".into()), 2),
        ]
    );
    assert_eq!(summary.total_high(), 1);
    assert_eq!(summary.total_low(), 1);
}

#[test]
fn filter_options_cascade() {
    let records = fixture();
    let all = FilterOptions::from_records(&records, &Filter::default());
    assert_eq!(all.regions, vec!["Amhara", "Oromia"]);
    assert_eq!(all.zones, vec!["Arsi", "Gondar", "Jimma"]);
    assert_eq!(all.periods, vec!["Feb", "Jan"]);

    let oromia = FilterOptions::from_records(
        &records,
        &Filter {
            region: Some("Oromia".into()),
            zone: Some("Jimma".into()),
            ..Filter::default()
        },
    );
    assert_eq!(oromia.zones, vec!["Arsi", "Jimma"]);
    assert_eq!(oromia.woredas, vec!["Jimma Town", "Seka"]);
}

#[test]
fn scorecard_totals_and_zero_distribution() {
    let records = fixture();
    let all = Filter::default().apply(&records);
    let card = scorecard(&all, Some("BCG"), &[]);
    assert_eq!(card.total_facilities, 4);
    assert!((card.total_administered - 320.0).abs() < 1e-9);
    assert!((card.total_distributed - 400.0).abs() < 1e-9);
    assert!((card.overall_utilization - 80.0).abs() < 1e-9);

    let amhara = Filter {
        region: Some("Amhara".into()),
        ..Filter::default()
    };
    let card = scorecard(&amhara.apply(&records), None, &["BCG".into(), "HPV".into()]);
    assert_eq!(card.overall_utilization, 0.0);
    assert_eq!(card.total_facilities, 1);
}

#[test]
fn categories_and_breakdown() {
    let thresholds = load_default_thresholds().unwrap();
    let records = fixture();
    let all = Filter::default().apply(&records);

    let counts = category_counts(&all, "BCG", &thresholds);
    assert_eq!(counts[&UtilizationCategory::Unacceptable], 2);
    assert_eq!(counts[&UtilizationCategory::Acceptable], 2);
    assert_eq!(counts[&UtilizationCategory::LowUtilization], 2);
    assert_eq!(counts[&UtilizationCategory::NotApplicable], 0);

    let rows = geographic_breakdown(&all, "BCG", &thresholds, BreakdownLevel::Region);
    let lines: Vec<String> = rows
        .iter()
        .map(|r| format!("{} {} {}/{} {:.2}%", r.group, r.category, r.count, r.group_total, r.percentage))
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    Amhara Unacceptable 1/2 50.00%
    Amhara Low Utilization 1/2 50.00%
    Oromia Acceptable 2/4 50.00%
    Oromia Unacceptable 1/4 25.00%
    Oromia Low Utilization 1/4 25.00%
    ");
}

#[test]
fn breakdown_level_follows_filter() {
    assert_eq!(BreakdownLevel::for_filter(&Filter::default()), BreakdownLevel::Region);
    let region = Filter {
        region: Some("Oromia".into()),
        ..Filter::default()
    };
    assert_eq!(BreakdownLevel::for_filter(&region), BreakdownLevel::Zone);
    let zone = Filter {
        zone: Some("Jimma".into()),
        ..region
    };
    assert_eq!(BreakdownLevel::for_filter(&zone), BreakdownLevel::Woreda);
}

#[test]
fn facility_view_sorted_by_rate() {
    let thresholds = load_default_thresholds().unwrap();
    let records = fixture();
    let rows = facility_view(&Filter::default().apply(&records), "BCG", &thresholds);
    let rates: Vec<f64> = rows.iter().map(|r| r.rate).collect();
    assert_eq!(rates, vec![1000.0, 130.0, 90.0, 70.0, 20.0, 0.0]);
    assert_eq!(rows[0].woreda, "Dabat");
}

#[test]
fn extremity_counts_per_vaccine() {
    let thresholds = load_default_thresholds().unwrap();
    let records = fixture();
    let counts = extremity_counts(
        &Filter::default().apply(&records),
        &["BCG".into(), "HPV".into()],
        &thresholds,
    );
    assert_eq!(counts[0].counts, Some((2, 2)));
    assert_eq!(counts[1].counts, None);
}
