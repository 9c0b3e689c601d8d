//! Canonical column names shared by every stage.

use crate::role::Role;

pub const WOREDA_ADMIN: &str = "Woreda_Admin";
pub const REGION_ADMIN: &str = "Region_Admin";
pub const ZONE_ADMIN: &str = "Zone_Admin";
pub const PERIOD_ADMIN: &str = "Period_Admin";

pub const WOREDA_DIST: &str = "Woreda_Dist";
pub const REGION_DIST: &str = "Region_Dist";
pub const ZONE_DIST: &str = "Zone_Dist";
pub const PERIOD_DIST: &str = "Period_Dist";

/// Derived reporting period carried by matched records (administered side is authoritative).
pub const PERIOD: &str = "Period";

/// Facility column for a role.
pub fn facility_column(role: Role) -> &'static str {
    match role {
        Role::Administered => WOREDA_ADMIN,
        Role::Distributed => WOREDA_DIST,
    }
}

/// Reporting period column for a role.
pub fn period_column(role: Role) -> &'static str {
    match role {
        Role::Administered => PERIOD_ADMIN,
        Role::Distributed => PERIOD_DIST,
    }
}

/// Geography columns (facility, region, zone) for a role.
pub fn geography_columns(role: Role) -> [&'static str; 3] {
    match role {
        Role::Administered => [WOREDA_ADMIN, REGION_ADMIN, ZONE_ADMIN],
        Role::Distributed => [WOREDA_DIST, REGION_DIST, ZONE_DIST],
    }
}

/// `{vaccine}_Administered` / `{vaccine}_Distributed`.
pub fn quantity_column(vaccine: &str, role: Role) -> String {
    match role {
        Role::Administered => administered_column(vaccine),
        Role::Distributed => distributed_column(vaccine),
    }
}

pub fn administered_column(vaccine: &str) -> String {
    format!("{vaccine}_Administered")
}

pub fn distributed_column(vaccine: &str) -> String {
    format!("{vaccine}_Distributed")
}

pub fn rate_column(vaccine: &str) -> String {
    format!("{vaccine}_Utilization_Rate")
}

pub fn category_column(vaccine: &str) -> String {
    format!("{vaccine}_Utilization_Category")
}
