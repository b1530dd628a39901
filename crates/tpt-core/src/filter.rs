//! Cohort filter engine.

use tpt_model::{FilterSpec, PatientRecord, YearBasis};
use tracing::debug;

use crate::error::Result;
use crate::scope::{ResolvedScope, resolve_scope};

/// Records selected by one filter application, borrowed from the snapshot.
#[derive(Debug, Clone)]
pub struct Cohort<'a> {
    basis: YearBasis,
    records: Vec<&'a PatientRecord>,
}

impl<'a> Cohort<'a> {
    pub fn new(records: Vec<&'a PatientRecord>, basis: YearBasis) -> Self {
        Self { basis, records }
    }

    /// Every record, unfiltered.
    pub fn from_records(records: &'a [PatientRecord], basis: YearBasis) -> Self {
        Self::new(records.iter().collect(), basis)
    }

    pub fn basis(&self) -> YearBasis {
        self.basis
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a PatientRecord> + '_ {
        self.records.iter().copied()
    }

    pub fn to_records(&self) -> Vec<PatientRecord> {
        self.iter().cloned().collect()
    }
}

/// Select the records matching `spec`, matching years on `basis`.
pub fn filter_records<'a>(
    records: &'a [PatientRecord],
    spec: &FilterSpec,
    basis: YearBasis,
) -> Result<Cohort<'a>> {
    spec.validate()?;
    let scope = resolve_scope(records, spec);
    Ok(select(records, spec, &scope, basis))
}

/// Enrollment cohort and outcome cohort for the same selection.
///
/// Both use the scopes resolved once against the full record set; the
/// outcome cohort matches `spec.years` against the reported year.
pub fn apply_filters<'a>(
    records: &'a [PatientRecord],
    spec: &FilterSpec,
) -> Result<(Cohort<'a>, Cohort<'a>)> {
    spec.validate()?;
    let scope = resolve_scope(records, spec);
    let cohort = select(records, spec, &scope, YearBasis::Enrollment);
    let outcome_cohort = select(records, spec, &scope, YearBasis::Reported);
    debug!(
        records = records.len(),
        cohort = cohort.len(),
        outcome_cohort = outcome_cohort.len(),
        regions = scope.regions.len(),
        facilities = scope.facilities.len(),
        "filters applied"
    );
    Ok((cohort, outcome_cohort))
}

fn select<'a>(
    records: &'a [PatientRecord],
    spec: &FilterSpec,
    scope: &ResolvedScope,
    basis: YearBasis,
) -> Cohort<'a> {
    let matching = records
        .iter()
        .filter(|record| record_matches(record, spec, scope, basis))
        .collect();
    Cohort::new(matching, basis)
}

fn record_matches(
    record: &PatientRecord,
    spec: &FilterSpec,
    scope: &ResolvedScope,
    basis: YearBasis,
) -> bool {
    record
        .region
        .as_ref()
        .is_some_and(|region| scope.regions.contains(region))
        && record
            .facility
            .as_ref()
            .is_some_and(|facility| scope.facilities.contains(facility))
        && spec.years.contains(&record.year_for(basis))
        && spec.age.contains(record.age)
        && record.sex.as_ref().is_some_and(|sex| spec.sexes.contains(sex))
        && record
            .regimen
            .as_ref()
            .is_some_and(|regimen| spec.regimens.contains(regimen))
}
