use tri_model::{Extremity, UtilizationCategory};
use tri_standards::ThresholdConfig;

/// Three-way band for a rate (percent). Unknown vaccines are `NotApplicable`.
pub fn categorize(rate: f64, vaccine: &str, thresholds: &ThresholdConfig) -> UtilizationCategory {
    let Some(band) = thresholds.utilization(vaccine) else {
        return UtilizationCategory::NotApplicable;
    };
    if rate > band.unacceptable {
        UtilizationCategory::Unacceptable
    } else if rate >= band.acceptable {
        UtilizationCategory::Acceptable
    } else {
        UtilizationCategory::LowUtilization
    }
}

/// Position against the extremity band; `None` when the vaccine has none.
pub fn classify_extremity(
    rate: f64,
    vaccine: &str,
    thresholds: &ThresholdConfig,
) -> Option<Extremity> {
    let band = thresholds.extremity(vaccine)?;
    Some(if rate > band.high {
        Extremity::High
    } else if rate < band.low {
        Extremity::Low
    } else {
        Extremity::Within
    })
}
