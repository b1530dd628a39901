use tpt_model::{HivStatus, Outcome, PatientRecord, Sex};
use tpt_transform::{age_group_detail, broad_age_group, reported_year};

/// A male 3HP enrollment with no HIV or outcome recorded.
pub(crate) fn record(region: &str, facility: &str, year: i32, age: u32) -> PatientRecord {
    PatientRecord {
        region: Some(region.to_string()),
        facility: Some(facility.to_string()),
        year,
        reported_year: reported_year(year),
        quarter: Some("Q1".to_string()),
        register_number: None,
        age,
        age_group: broad_age_group(age).label().to_string(),
        age_group_detail: age_group_detail(age),
        sex: Some(Sex::Male),
        hiv: None,
        regimen: Some("3HP".to_string()),
        outcome: None,
    }
}

pub(crate) fn with_hiv(hiv: HivStatus) -> PatientRecord {
    PatientRecord {
        hiv: Some(hiv),
        ..record("Yangon", "Hlaing", 2022, 30)
    }
}

pub(crate) fn with_outcome(outcome: Outcome) -> PatientRecord {
    PatientRecord {
        outcome: Some(outcome),
        ..record("Yangon", "Hlaing", 2022, 30)
    }
}
