mod common;

use common::{admin_table, dist_table};
use tri_match::{DuplicatePolicy, MatchOptions, MatchStrategy, match_records};
use tri_model::CellValue;

#[test]
fn exact_join_on_canonical_key() {
    let admin = admin_table(&[("Addis Ketema", "Jan-2024", 120.0)]);
    let dist = dist_table(&[("AddisKetema", "Jan-2024", 100.0)]);
    let outcome = match_records(&admin, &dist, &MatchOptions::default()).unwrap();

    assert_eq!(outcome.matched.len(), 1);
    let record = &outcome.matched[0];
    assert_eq!(record.entity_key, "addisketema");
    assert_eq!(record.text("Period"), "Jan-2024");
    assert!(!record.has_column("Period_Dist"));
    assert_eq!(record.get("BCG_Administered"), Some(&CellValue::Number(120.0)));
    assert_eq!(record.get("BCG_Distributed"), Some(&CellValue::Number(100.0)));
    assert!(outcome.unmatched.is_empty());
    assert!(outcome.name_bindings.is_empty());
}

#[test]
fn exact_join_misses_spelling_variant_that_fuzzy_binds() {
    let admin = admin_table(&[("Jimma Town", "Jan-2024", 90.0)]);
    let dist = dist_table(&[("Jima-Town", "Jan-2024", 100.0)]);

    let exact = match_records(&admin, &dist, &MatchOptions::default()).unwrap();
    assert!(exact.matched.is_empty());
    assert_eq!(exact.unmatched.administered.len(), 1);
    assert_eq!(exact.unmatched.distributed.len(), 1);

    let options = MatchOptions {
        strategy: MatchStrategy::Fuzzy { threshold: 85.0 },
        ..MatchOptions::default()
    };
    let fuzzy = match_records(&admin, &dist, &options).unwrap();
    assert_eq!(fuzzy.matched.len(), 1);
    assert_eq!(fuzzy.name_bindings.len(), 1);
    let binding = &fuzzy.name_bindings[0];
    assert_eq!(binding.admin_key, "jimmatown");
    assert_eq!(binding.dist_key, "jimatown");
    assert!(binding.score > 93.0 && binding.score < 95.0);
    assert!(fuzzy.unmatched.is_empty());
}

#[test]
fn fuzzy_never_binds_below_threshold() {
    let admin = admin_table(&[("Kersa", "Jan", 10.0)]);
    let dist = dist_table(&[("Seka Chekorsa", "Jan", 10.0)]);
    let options = MatchOptions {
        strategy: MatchStrategy::Fuzzy { threshold: 85.0 },
        ..MatchOptions::default()
    };
    let outcome = match_records(&admin, &dist, &options).unwrap();
    assert!(outcome.matched.is_empty());
    assert_eq!(outcome.unmatched.administered.len(), 1);
    assert_eq!(outcome.unmatched.distributed.len(), 1);
}

#[test]
fn period_mismatch_is_not_a_match_but_not_unmatched_either() {
    let admin = admin_table(&[("Bole", "Jan", 1.0), ("Bole", "Feb", 1.0)]);
    let dist = dist_table(&[("Bole", "Jan", 1.0)]);
    let outcome = match_records(&admin, &dist, &MatchOptions::default()).unwrap();
    assert_eq!(outcome.matched.len(), 1);
    assert!(outcome.unmatched.administered.is_empty());
}

#[test]
fn duplicates_fan_out_by_default_and_collapse_with_keep_first() {
    let admin = admin_table(&[("Bole", "Jan", 1.0), ("Bole", "Jan", 2.0)]);
    let dist = dist_table(&[("Bole", "Jan", 5.0), ("Bole", "Jan", 6.0)]);

    let fan_out = match_records(&admin, &dist, &MatchOptions::default()).unwrap();
    assert_eq!(fan_out.matched.len(), 4);
    let pairs: Vec<(usize, usize)> = fan_out
        .matched
        .iter()
        .map(|m| (m.admin_row, m.dist_row))
        .collect();
    assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

    let options = MatchOptions {
        duplicates: DuplicatePolicy::KeepFirst,
        ..MatchOptions::default()
    };
    let keep_first = match_records(&admin, &dist, &options).unwrap();
    assert_eq!(keep_first.matched.len(), 1);
    assert_eq!(keep_first.dropped_duplicates, (1, 1));
    assert!(keep_first.unmatched.is_empty());
}

#[test]
fn empty_join_is_not_an_error() {
    let admin = admin_table(&[("Bole", "Jan", 1.0)]);
    let dist = dist_table(&[("Kirkos", "Jan", 1.0)]);
    let outcome = match_records(&admin, &dist, &MatchOptions::default()).unwrap();
    assert!(outcome.matched.is_empty());
    assert_eq!(outcome.unmatched.administered.len(), 1);
    assert_eq!(outcome.unmatched.distributed.len(), 1);
}

#[test]
fn invalid_threshold_is_rejected() {
    let admin = admin_table(&[("Bole", "Jan", 1.0)]);
    let dist = dist_table(&[("Bole", "Jan", 1.0)]);
    let options = MatchOptions {
        strategy: MatchStrategy::Fuzzy { threshold: 150.0 },
        ..MatchOptions::default()
    };
    assert!(match_records(&admin, &dist, &options).is_err());
}
