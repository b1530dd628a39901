//! Row cleaning: raw register rows to [`PatientRecord`]s.
//!
//! A single pass over the table. Every row either becomes a record or is
//! counted under one drop reason in the [`NormalizationReport`].

use std::collections::BTreeMap;

use serde::Serialize;
use tpt_common::parse_whole_number;
use tpt_ingest::{RawRow, RawTable};
use tpt_model::{Field, HivStatus, NormalizationOptions, Outcome, PatientRecord, Sex};
use tracing::{debug, info, warn};

use crate::codes::{expand_hiv, expand_outcome, expand_sex};
use crate::derive::{age_group_detail, broad_age_group, reported_year};
use crate::error::TransformError;

/// What normalization did to the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizationReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    /// Rows with a blank enrollment year.
    pub dropped_missing_year: usize,
    /// Rows with a blank or non-numeric age.
    pub dropped_missing_age: usize,
    pub dropped_negative_age: usize,
    /// Codes outside the lookup tables, per field, with occurrence counts.
    pub unmapped: BTreeMap<Field, BTreeMap<String, usize>>,
}

impl NormalizationReport {
    pub fn dropped_rows(&self) -> usize {
        self.dropped_missing_year + self.dropped_missing_age + self.dropped_negative_age
    }

    pub fn unmapped_count(&self, field: Field) -> usize {
        self.unmapped
            .get(&field)
            .map_or(0, |codes| codes.values().sum())
    }

    fn record_unmapped(&mut self, field: Field, code: &str, warn_enabled: bool) {
        let count = self
            .unmapped
            .entry(field)
            .or_default()
            .entry(code.to_string())
            .or_insert(0);
        if *count == 0 && warn_enabled {
            warn!(field = %field, code, "unmapped register code passed through");
        }
        *count += 1;
    }
}

/// The cleaned snapshot.
#[derive(Debug, Clone, Default)]
pub struct NormalizedTable {
    pub records: Vec<PatientRecord>,
    pub report: NormalizationReport,
}

enum RowOutcome {
    Kept(Box<PatientRecord>),
    MissingYear,
    MissingAge,
    NegativeAge,
}

/// Clean every row of `table`.
///
/// Rows are numbered from 1 (the first data row) in errors and logs.
pub fn normalize_table(
    table: &RawTable,
    options: &NormalizationOptions,
) -> Result<NormalizedTable, TransformError> {
    let mut report = NormalizationReport {
        total_rows: table.len(),
        ..NormalizationReport::default()
    };
    let mut records = Vec::with_capacity(table.len());

    for (idx, row) in table.rows().enumerate() {
        match normalize_row(idx + 1, row, options, &mut report)? {
            RowOutcome::Kept(record) => records.push(*record),
            RowOutcome::MissingYear => report.dropped_missing_year += 1,
            RowOutcome::MissingAge => report.dropped_missing_age += 1,
            RowOutcome::NegativeAge => report.dropped_negative_age += 1,
        }
    }
    report.kept_rows = records.len();

    if report.total_rows > 0 && records.is_empty() {
        return Err(TransformError::AllRowsDropped {
            rows: report.total_rows,
            missing_year: report.dropped_missing_year,
            missing_age: report.dropped_missing_age,
            negative_age: report.dropped_negative_age,
        });
    }
    if report.dropped_missing_age + report.dropped_negative_age > 0 {
        warn!(
            missing = report.dropped_missing_age,
            negative = report.dropped_negative_age,
            "rows dropped for unusable age"
        );
    }
    info!(
        rows = report.total_rows,
        kept = report.kept_rows,
        dropped_missing_year = report.dropped_missing_year,
        "register normalized"
    );
    Ok(NormalizedTable { records, report })
}

fn normalize_row(
    row_number: usize,
    row: RawRow<'_>,
    options: &NormalizationOptions,
    report: &mut NormalizationReport,
) -> Result<RowOutcome, TransformError> {
    let Some(year) = parse_year(row_number, row.get(Field::Year))? else {
        return Ok(RowOutcome::MissingYear);
    };

    let raw_age = row.get(Field::Age);
    let age = match raw_age.map(parse_whole_number) {
        None | Some(Ok(None)) => return Ok(RowOutcome::MissingAge),
        Some(Err(error)) => {
            debug!(row = row_number, %error, "dropping row with non-numeric age");
            return Ok(RowOutcome::MissingAge);
        }
        Some(Ok(Some(age))) if age < 0 => {
            debug!(row = row_number, age, "dropping row with negative age");
            return Ok(RowOutcome::NegativeAge);
        }
        Some(Ok(Some(age))) => match u32::try_from(age) {
            Ok(age) => age,
            Err(_) => return Ok(RowOutcome::MissingAge),
        },
    };

    let warn_enabled = options.warn_on_unmapped;
    let sex = row.get(Field::Sex).map(|code| {
        let sex = expand_sex(code);
        if let Sex::Unrecognized(code) = &sex {
            report.record_unmapped(Field::Sex, code, warn_enabled);
        }
        sex
    });
    let hiv = row.get(Field::Hiv).map(|code| {
        let hiv = expand_hiv(code);
        if let HivStatus::Unrecognized(code) = &hiv {
            report.record_unmapped(Field::Hiv, code, warn_enabled);
        }
        hiv
    });
    let outcome = row.get(Field::Outcome).map(|code| {
        let outcome = expand_outcome(code);
        if let Outcome::Unrecognized(code) = &outcome {
            report.record_unmapped(Field::Outcome, code, warn_enabled);
        }
        outcome
    });

    let age_group = row
        .get(Field::AgeGroup)
        .map_or_else(|| broad_age_group(age).label().to_string(), str::to_string);

    Ok(RowOutcome::Kept(Box::new(PatientRecord {
        region: text(row, Field::Region),
        facility: text(row, Field::Facility),
        year,
        reported_year: reported_year(year),
        quarter: text(row, Field::Quarter),
        register_number: text(row, Field::RegisterNumber),
        age,
        age_group,
        age_group_detail: age_group_detail(age),
        sex,
        hiv,
        regimen: text(row, Field::Regimen),
        outcome,
    })))
}

fn parse_year(row_number: usize, raw: Option<&str>) -> Result<Option<i32>, TransformError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let conversion_error = || TransformError::TypeConversion {
        field: Field::Year.as_str(),
        row: row_number,
        value: raw.to_string(),
    };
    match parse_whole_number(raw) {
        Ok(None) => Ok(None),
        // The reported year must stay representable.
        Ok(Some(year)) => i32::try_from(year)
            .ok()
            .filter(|year| year.checked_add(1).is_some())
            .map(Some)
            .ok_or_else(conversion_error),
        Err(_) => Err(conversion_error()),
    }
}

fn text(row: RawRow<'_>, field: Field) -> Option<String> {
    row.get(field).map(str::to_string)
}
