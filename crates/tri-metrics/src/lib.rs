//! Utilization metrics over matched records.
//!
//! [`compute_utilization`] turns matched records into
//! [`tri_model::UtilizationRecord`]s; everything else here is a pure view
//! over a (usually filtered) slice of those records:
//!
//! - threshold categories ([`categorize`]) and extremity flags
//!   ([`classify_extremity`]),
//! - the extremity summary by region or region and zone,
//! - scorecards, category counts, geographic breakdowns and the facility view.
//!
//! All thresholds are in percent, as loaded by `tri-standards`.

#![deny(unsafe_code)]

pub mod classify;
pub mod filter;
pub mod rates;
pub mod summary;
pub mod views;

pub use classify::{categorize, classify_extremity};
pub use filter::{Filter, FilterOptions};
pub use rates::{RATE_CEILING, compute_utilization, has_rate, utilization_rate};
pub use summary::{ExtremityCount, extremity_counts, summarize_extremities};
pub use views::{
    BreakdownLevel, BreakdownRow, FacilityRow, Scorecard, category_counts, facility_view,
    geographic_breakdown, scorecard,
};
