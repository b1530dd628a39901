//! Cohort filtering and metrics for the TPT dashboard.
//!
//! The flow is `Dashboard::load` (ingest + normalize, once), then per
//! selection `apply_filters` → `compute_metrics`.

pub mod dashboard;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod scope;

#[cfg(test)]
mod test_support;

pub use dashboard::{Dashboard, DashboardView, SnapshotCell};
pub use error::{CoreError, Result};
pub use filter::{Cohort, apply_filters, filter_records};
pub use metrics::{
    compute_metrics, count_by, count_by_age_group, count_by_age_group_detail, count_by_hiv,
    count_by_outcome, count_by_quarter, count_by_region, count_by_region_sex, count_by_regimen,
    count_by_sex, count_by_year, hiv_coverage, rank_facilities, treatment_success,
};
pub use scope::{
    DashboardDefault, FilterOptions, ResolvedScope, resolve_facility_scope, resolve_region_scope,
    resolve_scope,
};
