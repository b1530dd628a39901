use serde::{Deserialize, Serialize};

use crate::age::AgeGroupDetail;
use crate::enums::{HivStatus, Outcome, Sex};
use crate::filter::YearBasis;

/// One normalized TPT enrollment.
///
/// Records are immutable once normalization has produced them. Optional
/// categorical fields are `None` when the register cell was blank; a `None`
/// never matches a filter selection and is left out of grouped counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub region: Option<String>,
    pub facility: Option<String>,
    /// Enrollment year.
    pub year: i32,
    /// `year + 1`: the year in which this enrollment's outcome is evaluated.
    pub reported_year: i32,
    pub quarter: Option<String>,
    pub register_number: Option<String>,
    pub age: u32,
    /// Broad band label, as entered or derived from `age`.
    pub age_group: String,
    pub age_group_detail: AgeGroupDetail,
    pub sex: Option<Sex>,
    pub hiv: Option<HivStatus>,
    pub regimen: Option<String>,
    pub outcome: Option<Outcome>,
}

impl PatientRecord {
    /// The year this record is matched on for the given cohort basis.
    pub fn year_for(&self, basis: YearBasis) -> i32 {
        match basis {
            YearBasis::Enrollment => self.year,
            YearBasis::Reported => self.reported_year,
        }
    }
}
