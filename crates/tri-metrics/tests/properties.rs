use proptest::prelude::*;
use tri_metrics::{RATE_CEILING, categorize, utilization_rate};
use tri_model::UtilizationCategory;
use tri_standards::load_default_thresholds;

proptest! {
    #[test]
    fn rate_stays_within_bounds(administered in -1e6..1e9f64, distributed in -1e3..1e9f64) {
        let rate = utilization_rate(administered, distributed);
        prop_assert!((0.0..=RATE_CEILING).contains(&rate));
    }

    #[test]
    fn every_rate_gets_exactly_one_category(
        rate in 0.0..=RATE_CEILING,
        vaccine in prop_oneof![
            proptest::sample::select(vec!["BCG", "IPV", "Measles", "Penta", "Rota"]).prop_map(str::to_string),
            "[A-Za-z]{1,8}",
        ],
    ) {
        let thresholds = load_default_thresholds().unwrap();
        let category = categorize(rate, &vaccine, &thresholds);
        prop_assert!(UtilizationCategory::ALL.contains(&category));
        if thresholds.utilization(&vaccine).is_none() {
            prop_assert_eq!(category, UtilizationCategory::NotApplicable);
        } else {
            prop_assert_ne!(category, UtilizationCategory::NotApplicable);
        }
    }
}
