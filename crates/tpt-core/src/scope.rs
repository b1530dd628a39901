//! Filter options and "All" scope resolution.
//!
//! Resolution is two-staged: the region scope is fixed first, and the
//! facility scope is resolved against records inside it. A facility `All`
//! therefore means every facility under the selected regions.

use std::collections::BTreeSet;

use serde::Serialize;
use tpt_model::{AgeRange, FilterSpec, PatientRecord, Selection, Sex};

const DEFAULT_REGION: &str = "Yangon";

/// Values a presentation layer offers for each filter dimension.
///
/// Every list is sorted and de-duplicated. Blank cells are not offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub years: Vec<i32>,
    pub sexes: Vec<Sex>,
    pub regimens: Vec<String>,
    /// Youngest and oldest age in the snapshot, `None` without records.
    pub age: Option<AgeRange>,
}

impl FilterOptions {
    pub fn from_records(records: &[PatientRecord]) -> Self {
        let regions: BTreeSet<&str> = records.iter().filter_map(|r| r.region.as_deref()).collect();
        let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
        let sexes: BTreeSet<&Sex> = records.iter().filter_map(|r| r.sex.as_ref()).collect();
        let regimens: BTreeSet<&str> = records
            .iter()
            .filter_map(|r| r.regimen.as_deref())
            .collect();
        let min_age = records.iter().map(|r| r.age).min();
        let max_age = records.iter().map(|r| r.age).max();

        Self {
            regions: regions.into_iter().map(str::to_string).collect(),
            years: years.into_iter().collect(),
            sexes: sexes.into_iter().cloned().collect(),
            regimens: regimens.into_iter().map(str::to_string).collect(),
            age: min_age.zip(max_age).map(|(min, max)| AgeRange::new(min, max)),
        }
    }

    /// Facilities present under `region_scope`, sorted.
    pub fn facilities_for(records: &[PatientRecord], region_scope: &BTreeSet<String>) -> Vec<String> {
        facilities_in(records, region_scope)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// The initial selection of the dashboard.
pub trait DashboardDefault {
    /// `Yangon` when present (otherwise every region), every facility, every
    /// year, the full age range, `Male` and `Female`, every regimen.
    fn dashboard_default(options: &FilterOptions) -> Self;
}

impl DashboardDefault for FilterSpec {
    fn dashboard_default(options: &FilterOptions) -> Self {
        let regions = if options.regions.iter().any(|r| r == DEFAULT_REGION) {
            Selection::only([DEFAULT_REGION])
        } else {
            Selection::All
        };
        FilterSpec {
            regions,
            facilities: Selection::All,
            years: options.years.iter().copied().collect(),
            age: options.age.unwrap_or(AgeRange::new(0, u32::MAX)),
            sexes: [Sex::Male, Sex::Female].into_iter().collect(),
            regimens: options.regimens.iter().cloned().collect(),
        }
    }
}

/// Concrete region and facility sets for one filter application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedScope {
    pub regions: BTreeSet<String>,
    pub facilities: BTreeSet<String>,
}

/// Expand the region selection. `All` is every region present in `records`.
pub fn resolve_region_scope(records: &[PatientRecord], spec: &FilterSpec) -> BTreeSet<String> {
    match &spec.regions {
        Selection::All => records
            .iter()
            .filter_map(|r| r.region.clone())
            .collect(),
        Selection::Only(regions) => regions.clone(),
    }
}

/// Expand the facility selection. `All` is every facility of a record whose
/// region is in `region_scope`.
pub fn resolve_facility_scope(
    records: &[PatientRecord],
    spec: &FilterSpec,
    region_scope: &BTreeSet<String>,
) -> BTreeSet<String> {
    match &spec.facilities {
        Selection::All => facilities_in(records, region_scope)
            .into_iter()
            .map(str::to_string)
            .collect(),
        Selection::Only(facilities) => facilities.clone(),
    }
}

/// Both stages of scope resolution.
pub fn resolve_scope(records: &[PatientRecord], spec: &FilterSpec) -> ResolvedScope {
    let regions = resolve_region_scope(records, spec);
    let facilities = resolve_facility_scope(records, spec, &regions);
    ResolvedScope {
        regions,
        facilities,
    }
}

fn facilities_in<'a>(
    records: &'a [PatientRecord],
    region_scope: &BTreeSet<String>,
) -> BTreeSet<&'a str> {
    records
        .iter()
        .filter(|r| r.region.as_ref().is_some_and(|region| region_scope.contains(region)))
        .filter_map(|r| r.facility.as_deref())
        .collect()
}
