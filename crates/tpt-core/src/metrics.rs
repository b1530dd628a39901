//! Grouped counts and ratio metrics over a cohort.
//!
//! Every aggregator accepts an empty cohort and returns an empty table (or
//! an undefined percentage). [`compute_metrics`] is the single place that
//! refuses an empty enrollment cohort.

use std::collections::BTreeMap;

use tpt_model::{
    AgeGroup, AgeGroupDetail, CountRow, CountTable, CrossCountRow, HivCoverage, HivStatus,
    MetricsBundle, Outcome, PatientRecord, RankedCountTable, RankedRow, TreatmentResult, TreatmentSuccess,
};
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::filter::Cohort;

/// Count records per key, skipping records without one. Keys come back in
/// ascending order.
pub fn count_by<K, F>(cohort: &Cohort<'_>, key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&PatientRecord) -> Option<K>,
{
    let mut counts = BTreeMap::new();
    for record in cohort.iter() {
        if let Some(key) = key(record) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

fn to_table<K: ToString>(counts: BTreeMap<K, usize>) -> CountTable {
    CountTable::new(
        counts
            .into_iter()
            .map(|(key, count)| CountRow {
                key: key.to_string(),
                count,
            })
            .collect(),
    )
}

/// Sort rows by descending count. The sort is stable, so ties keep their
/// incoming (key) order.
fn by_count_desc(mut rows: Vec<CountRow>) -> Vec<CountRow> {
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Enrollments per year, in numeric year order.
pub fn count_by_year(cohort: &Cohort<'_>) -> CountTable {
    to_table(count_by(cohort, |r| Some(r.year)))
}

pub fn count_by_quarter(cohort: &Cohort<'_>) -> CountTable {
    to_table(count_by(cohort, |r| r.quarter.clone()))
}

/// Enrollments per region, largest first.
pub fn count_by_region(cohort: &Cohort<'_>) -> CountTable {
    let table = to_table(count_by(cohort, |r| r.region.clone()));
    CountTable::new(by_count_desc(table.rows))
}

/// Facility ranking: descending count with a 1-based serial number.
pub fn rank_facilities(cohort: &Cohort<'_>) -> RankedCountTable {
    let table = to_table(count_by(cohort, |r| r.facility.clone()));
    let rows = by_count_desc(table.rows)
        .into_iter()
        .enumerate()
        .map(|(idx, row)| RankedRow {
            serial: idx + 1,
            key: row.key,
            count: row.count,
        })
        .collect();
    RankedCountTable { rows }
}

/// Sex split per region, ordered by region then sex.
pub fn count_by_region_sex(cohort: &Cohort<'_>) -> Vec<CrossCountRow> {
    count_by(cohort, |r| {
        r.region
            .clone()
            .zip(r.sex.as_ref().map(|sex| sex.label().to_string()))
    })
    .into_iter()
    .map(|((group, key), count)| CrossCountRow { group, key, count })
    .collect()
}

pub fn count_by_sex(cohort: &Cohort<'_>) -> CountTable {
    to_table(count_by(cohort, |r| r.sex.as_ref().map(|sex| sex.label().to_string())))
}

/// Broad age groups in band order. Labels entered by hand that are not one
/// of the four bands sort after them.
pub fn count_by_age_group(cohort: &Cohort<'_>) -> CountTable {
    let counts = count_by(cohort, |r| {
        Some((
            AgeGroup::rank_of_label(&r.age_group).unwrap_or(usize::MAX),
            r.age_group.clone(),
        ))
    });
    CountTable::new(
        counts
            .into_iter()
            .map(|((_, key), count)| CountRow { key, count })
            .collect(),
    )
}

/// Detailed age bands in band order.
pub fn count_by_age_group_detail(cohort: &Cohort<'_>) -> CountTable {
    let counts: BTreeMap<AgeGroupDetail, usize> = count_by(cohort, |r| Some(r.age_group_detail));
    to_table(counts)
}

pub fn count_by_regimen(cohort: &Cohort<'_>) -> CountTable {
    to_table(count_by(cohort, |r| r.regimen.clone()))
}

pub fn count_by_hiv(cohort: &Cohort<'_>) -> CountTable {
    to_table(count_by(cohort, |r| r.hiv.as_ref().map(|hiv| hiv.label().to_string())))
}

/// Outcome labels of the outcome cohort.
pub fn count_by_outcome(outcome_cohort: &Cohort<'_>) -> CountTable {
    to_table(count_by(outcome_cohort, |r| {
        r.outcome.as_ref().map(|outcome| outcome.label().to_string())
    }))
}

/// `part / whole * 100`, undefined for an empty denominator.
fn percent(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64 * 100.0)
}

/// HIV testing coverage.
///
/// Known is Pos + Neg, unknown is Unk; a category absent from the cohort
/// counts as zero. Unrecognized codes and blank cells count toward neither.
///
/// # Examples
///
/// ```
/// use tpt_core::{Cohort, hiv_coverage};
/// use tpt_model::YearBasis;
///
/// let coverage = hiv_coverage(&Cohort::from_records(&[], YearBasis::Enrollment));
/// assert_eq!(coverage.percent, None);
/// ```
pub fn hiv_coverage(cohort: &Cohort<'_>) -> HivCoverage {
    let (known, unknown) = cohort
        .iter()
        .filter_map(|r| r.hiv.as_ref())
        .fold((0, 0), |(known, unknown), hiv| {
            if hiv.is_known() {
                (known + 1, unknown)
            } else if *hiv == HivStatus::Unk {
                (known, unknown + 1)
            } else {
                (known, unknown)
            }
        });
    HivCoverage {
        known,
        unknown,
        percent: percent(known, known + unknown),
    }
}

/// Treatment success rate over the outcome cohort.
///
/// Only `Complete` is a success; the six other known outcomes are not.
/// Unrecognized codes and records without an outcome are left out.
pub fn treatment_success(outcome_cohort: &Cohort<'_>) -> TreatmentSuccess {
    let (success, not_success) = outcome_cohort
        .iter()
        .filter_map(|r| r.outcome.as_ref().and_then(Outcome::treatment_result))
        .fold((0, 0), |(success, not_success), result| {
            match result {
                TreatmentResult::Success => (success + 1, not_success),
                TreatmentResult::NotSuccess => (success, not_success + 1),
            }
        });
    TreatmentSuccess {
        success,
        not_success,
        percent: percent(success, success + not_success),
    }
}

/// Build every dashboard table and ratio.
///
/// Fails with [`CoreError::EmptyCohort`] when the enrollment cohort is
/// empty. An empty outcome cohort is fine: its table is empty and the
/// success rate undefined.
pub fn compute_metrics(cohort: &Cohort<'_>, outcome_cohort: &Cohort<'_>) -> Result<MetricsBundle> {
    if cohort.is_empty() {
        return Err(CoreError::EmptyCohort);
    }
    let bundle = MetricsBundle {
        total_cases: cohort.len(),
        by_year: count_by_year(cohort),
        by_quarter: count_by_quarter(cohort),
        by_region: count_by_region(cohort),
        by_facility: rank_facilities(cohort),
        by_region_sex: count_by_region_sex(cohort),
        by_sex: count_by_sex(cohort),
        by_age_group: count_by_age_group(cohort),
        by_age_group_detail: count_by_age_group_detail(cohort),
        by_regimen: count_by_regimen(cohort),
        by_hiv: count_by_hiv(cohort),
        hiv_coverage: hiv_coverage(cohort),
        outcome_cases: outcome_cohort.len(),
        by_outcome: count_by_outcome(outcome_cohort),
        treatment_success: treatment_success(outcome_cohort),
    };
    debug!(
        cases = bundle.total_cases,
        outcome_cases = bundle.outcome_cases,
        facilities = bundle.by_facility.len(),
        "metrics computed"
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, with_hiv, with_outcome};
    use tpt_model::YearBasis;
    use tpt_transform::expand_outcome;

    fn cohort(records: &[PatientRecord]) -> Cohort<'_> {
        Cohort::from_records(records, YearBasis::Enrollment)
    }

    fn repeat(record: PatientRecord, n: usize) -> Vec<PatientRecord> {
        vec![record; n]
    }

    #[test]
    fn hiv_coverage_half_known() {
        let mut records = repeat(with_hiv(HivStatus::Pos), 3);
        records.extend(repeat(with_hiv(HivStatus::Neg), 2));
        records.extend(repeat(with_hiv(HivStatus::Unk), 5));
        let coverage = hiv_coverage(&cohort(&records));
        assert_eq!(coverage.known, 5);
        assert_eq!(coverage.unknown, 5);
        assert_eq!(coverage.percent, Some(50.0));
    }

    #[test]
    fn hiv_coverage_without_results_is_undefined() {
        let records = vec![record("Yangon", "Hlaing", 2022, 30)];
        let coverage = hiv_coverage(&cohort(&records));
        assert_eq!((coverage.known, coverage.unknown), (0, 0));
        assert_eq!(coverage.percent, None);
    }

    #[test]
    fn hiv_coverage_zero_fills_missing_category() {
        let records = repeat(with_hiv(HivStatus::Unk), 4);
        let coverage = hiv_coverage(&cohort(&records));
        assert_eq!(coverage.known, 0);
        assert_eq!(coverage.percent, Some(0.0));
    }

    #[test]
    fn treatment_success_rates() {
        let mut records = repeat(with_outcome(Outcome::Complete), 9);
        records.push(with_outcome(Outcome::Died));
        let tsr = treatment_success(&cohort(&records));
        assert_eq!((tsr.success, tsr.not_success), (9, 1));
        assert_eq!(tsr.percent, Some(90.0));

        let all_complete = repeat(with_outcome(Outcome::Complete), 3);
        assert_eq!(treatment_success(&cohort(&all_complete)).percent, Some(100.0));

        let tsr = treatment_success(&cohort(&[]));
        assert_eq!((tsr.success, tsr.not_success), (0, 0));
        assert_eq!(tsr.percent, None);
    }

    #[test]
    fn unrecognized_outcome_is_left_out_of_success_rate() {
        let records = vec![
            with_outcome(Outcome::Complete),
            with_outcome(expand_outcome("LTFU")),
        ];
        let tsr = treatment_success(&cohort(&records));
        assert_eq!((tsr.success, tsr.not_success), (1, 0));
        assert_eq!(tsr.percent, Some(100.0));
        // Still listed in the outcome table.
        assert_eq!(count_by_outcome(&cohort(&records)).get("LTFU"), 1);
    }

    #[test]
    fn facilities_ranked_with_stable_ties() {
        let records = vec![
            record("Yangon", "Insein", 2022, 30),
            record("Yangon", "Hlaing", 2022, 30),
            record("Yangon", "Thingangyun", 2022, 30),
            record("Yangon", "Thingangyun", 2022, 30),
        ];
        let ranked = rank_facilities(&cohort(&records));
        let rows: Vec<(usize, &str, usize)> = ranked
            .rows
            .iter()
            .map(|row| (row.serial, row.key.as_str(), row.count))
            .collect();
        assert_eq!(
            rows,
            vec![(1, "Thingangyun", 2), (2, "Hlaing", 1), (3, "Insein", 1)]
        );
    }

    #[test]
    fn age_tables_follow_band_order() {
        let records = vec![
            record("Yangon", "Hlaing", 2022, 70),
            record("Yangon", "Hlaing", 2022, 3),
            record("Yangon", "Hlaing", 2022, 12),
        ];
        let c = cohort(&records);
        assert_eq!(
            count_by_age_group_detail(&c).keys(),
            vec!["0-4 yrs", "10-14 yrs", "> 65 yrs"]
        );
        assert_eq!(
            count_by_age_group(&c).keys(),
            vec!["0-4 yrs", "5-14 yrs", "> 60 yrs"]
        );
    }

    #[test]
    fn year_order_is_numeric() {
        let records = vec![
            record("Yangon", "Hlaing", 2023, 30),
            record("Yangon", "Hlaing", 999, 30),
        ];
        assert_eq!(count_by_year(&cohort(&records)).keys(), vec!["999", "2023"]);
    }

    #[test]
    fn region_sex_split() {
        let mut female = record("Yangon", "Hlaing", 2022, 30);
        female.sex = Some(tpt_model::Sex::Female);
        let records = vec![
            female,
            record("Yangon", "Hlaing", 2022, 30),
            record("Mandalay", "Chanmyathazi", 2022, 30),
        ];
        let split = count_by_region_sex(&cohort(&records));
        assert_eq!(split.len(), 3);
        assert_eq!(split[0].group, "Mandalay");
        assert_eq!(split[1].key, "Female");
    }

    #[test]
    fn empty_enrollment_cohort_fails_fast() {
        let error = compute_metrics(&cohort(&[]), &cohort(&[])).unwrap_err();
        assert!(matches!(error, CoreError::EmptyCohort));
    }

    #[test]
    fn empty_outcome_cohort_is_undefined_not_an_error() {
        let records = vec![record("Yangon", "Hlaing", 2022, 30)];
        let bundle = compute_metrics(&cohort(&records), &cohort(&[])).unwrap();
        assert_eq!(bundle.total_cases, 1);
        assert_eq!(bundle.outcome_cases, 0);
        assert!(bundle.by_outcome.is_empty());
        assert_eq!(bundle.treatment_success.percent, None);
    }
}
