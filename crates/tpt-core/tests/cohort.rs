//! Filter engine and metrics over synthetic register snapshots.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tpt_core::{
    Cohort, DashboardDefault, FilterOptions, apply_filters, compute_metrics, filter_records,
};
use tpt_model::{AgeRange, FilterSpec, PatientRecord, Selection, Sex, YearBasis};
use tpt_transform::{age_group_detail, broad_age_group, reported_year};

const REGIONS: [&str; 3] = ["Yangon", "Mandalay", "Bago"];
const FACILITIES: [&str; 2] = ["North", "South"];

fn patient(region: &str, facility: &str, year: i32, age: u32, sex: Sex) -> PatientRecord {
    PatientRecord {
        region: Some(region.to_string()),
        facility: Some(format!("{region} {facility}")),
        year,
        reported_year: reported_year(year),
        quarter: Some("Q2".to_string()),
        register_number: None,
        age,
        age_group: broad_age_group(age).label().to_string(),
        age_group_detail: age_group_detail(age),
        sex: Some(sex),
        hiv: None,
        regimen: Some("3HP".to_string()),
        outcome: None,
    }
}

/// Every record passes.
fn open_spec(records: &[PatientRecord]) -> FilterSpec {
    let options = FilterOptions::from_records(records);
    FilterSpec {
        regions: Selection::All,
        facilities: Selection::All,
        age: AgeRange::new(0, u32::MAX),
        sexes: options.sexes.iter().cloned().collect(),
        ..FilterSpec::dashboard_default(&options)
    }
}

fn apply(records: &[PatientRecord], spec: &FilterSpec) -> Vec<PatientRecord> {
    filter_records(records, spec, YearBasis::Enrollment)
        .unwrap()
        .to_records()
}

fn record_strategy() -> impl Strategy<Value = PatientRecord> {
    (0..REGIONS.len(), 0..FACILITIES.len(), 2019i32..2025, 0u32..90, any::<bool>()).prop_map(
        |(region, facility, year, age, male)| {
            let sex = if male { Sex::Male } else { Sex::Female };
            patient(REGIONS[region], FACILITIES[facility], year, age, sex)
        },
    )
}

#[test]
fn yangon_2022_end_to_end() {
    let mut records: Vec<PatientRecord> = (0..5)
        .map(|i| patient("Yangon", "North", 2022, 20 + i, Sex::Male))
        .collect();
    records.extend((0..5).map(|i| patient("Mandalay", "South", 2023, 30 + i, Sex::Female)));

    let spec = FilterSpec {
        regions: Selection::only(["Yangon"]),
        years: [2022].into_iter().collect(),
        ..open_spec(&records)
    };
    let (cohort, outcome_cohort) = apply_filters(&records, &spec).unwrap();
    assert_eq!(cohort.len(), 5);

    let metrics = compute_metrics(&cohort, &outcome_cohort).unwrap();
    assert_eq!(metrics.by_year.rows.len(), 1);
    assert_eq!(metrics.by_year.get("2022"), 5);
    assert_eq!(metrics.outcome_cases, 0);
    assert_eq!(metrics.treatment_success.percent, None);
}

#[test]
fn all_regions_and_all_facilities_is_unfiltered() {
    let records: Vec<PatientRecord> = REGIONS
        .iter()
        .flat_map(|region| {
            FACILITIES
                .iter()
                .map(move |facility| patient(region, facility, 2022, 40, Sex::Female))
        })
        .collect();
    let spec = FilterSpec {
        regions: Selection::from_choices(&["All"]),
        facilities: Selection::from_choices(&["All"]),
        ..open_spec(&records)
    };
    assert_eq!(apply(&records, &spec), records);
}

#[test]
fn facility_all_stays_inside_region_selection() {
    let records = vec![
        patient("Yangon", "North", 2022, 40, Sex::Male),
        patient("Mandalay", "North", 2022, 40, Sex::Male),
    ];
    let spec = FilterSpec {
        regions: Selection::only(["Mandalay"]),
        ..open_spec(&records)
    };
    let cohort = apply(&records, &spec);
    assert_eq!(cohort.len(), 1);
    assert_eq!(cohort[0].facility.as_deref(), Some("Mandalay North"));
}

#[test]
fn facility_outside_region_matches_nothing() {
    let records = vec![
        patient("Yangon", "North", 2022, 40, Sex::Male),
        patient("Mandalay", "North", 2022, 40, Sex::Male),
    ];
    let spec = FilterSpec {
        regions: Selection::only(["Mandalay"]),
        facilities: Selection::only(["Yangon North"]),
        ..open_spec(&records)
    };
    assert!(apply(&records, &spec).is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn filtering_is_idempotent(
        records in prop::collection::vec(record_strategy(), 0..40),
        region in 0..REGIONS.len(),
        min_age in 0u32..60,
        span in 0u32..40,
    ) {
        let spec = FilterSpec {
            regions: Selection::only([REGIONS[region], "Bago"]),
            age: AgeRange::new(min_age, min_age + span),
            sexes: BTreeSet::from([Sex::Female]),
            ..open_spec(&records)
        };
        let once = apply(&records, &spec);
        let twice = apply(&once, &spec);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn region_and_age_filters_commute(
        records in prop::collection::vec(record_strategy(), 0..40),
        region in 0..REGIONS.len(),
        min_age in 0u32..60,
        span in 0u32..40,
    ) {
        let by_region = FilterSpec {
            regions: Selection::only([REGIONS[region]]),
            ..open_spec(&records)
        };
        let by_age = FilterSpec {
            age: AgeRange::new(min_age, min_age + span),
            ..open_spec(&records)
        };
        let region_then_age = apply(&apply(&records, &by_region), &by_age);
        let age_then_region = apply(&apply(&records, &by_age), &by_region);
        prop_assert_eq!(region_then_age, age_then_region);
    }

    #[test]
    fn outcome_year_is_enrollment_year_shifted(
        records in prop::collection::vec(record_strategy(), 0..40),
        year in 2019i32..2026,
    ) {
        let reported = FilterSpec {
            years: BTreeSet::from([year]),
            ..open_spec(&records)
        };
        let enrolled = FilterSpec {
            years: BTreeSet::from([year - 1]),
            ..open_spec(&records)
        };
        let outcome: Vec<PatientRecord> = filter_records(&records, &reported, YearBasis::Reported)
            .unwrap()
            .to_records();
        let enrollment: Vec<PatientRecord> =
            filter_records(&records, &enrolled, YearBasis::Enrollment)
                .unwrap()
                .to_records();
        prop_assert_eq!(outcome, enrollment);
    }

    #[test]
    fn cohort_counts_match_grouped_totals(
        records in prop::collection::vec(record_strategy(), 1..40),
    ) {
        let cohort = Cohort::from_records(&records, YearBasis::Enrollment);
        let outcome_cohort = Cohort::from_records(&[], YearBasis::Reported);
        let metrics = compute_metrics(&cohort, &outcome_cohort).unwrap();
        prop_assert_eq!(metrics.by_year.total(), records.len());
        prop_assert_eq!(metrics.by_age_group_detail.total(), records.len());
        prop_assert_eq!(
            metrics.by_facility.rows.iter().map(|row| row.count).sum::<usize>(),
            records.len()
        );
    }
}
