//! Canonical register columns.
//!
//! Register extracts are typed by hand into a spreadsheet template whose
//! header cells carry a label line plus instructions on following lines
//! (`"HIV status (Pos/Neg/Unk)\nselect one"`). Headers are first reduced to a
//! canonical form (see `tpt_ingest::canonical_header`) and then matched here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A register column the pipeline understands.
///
/// Columns that do not resolve to a `Field` are dropped at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// State or region name.
    Region,
    /// Township (treatment facility) name.
    Facility,
    /// Enrollment year.
    Year,
    /// Reporting period, e.g. `Q1`.
    Quarter,
    /// TPT register number.
    RegisterNumber,
    Age,
    /// Broad age group entered by the register clerk.
    AgeGroup,
    Sex,
    Hiv,
    /// TPT regimen, e.g. `3HP` or `6H`.
    Regimen,
    /// Treatment outcome code.
    Outcome,
}

impl Field {
    pub const ALL: [Field; 11] = [
        Field::Region,
        Field::Facility,
        Field::Year,
        Field::Quarter,
        Field::RegisterNumber,
        Field::Age,
        Field::AgeGroup,
        Field::Sex,
        Field::Hiv,
        Field::Regimen,
        Field::Outcome,
    ];

    /// Short identifier used in logs and output headers.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Region => "region",
            Field::Facility => "facility",
            Field::Year => "year",
            Field::Quarter => "quarter",
            Field::RegisterNumber => "register_no",
            Field::Age => "age",
            Field::AgeGroup => "age_group",
            Field::Sex => "sex",
            Field::Hiv => "hiv",
            Field::Regimen => "regimen",
            Field::Outcome => "outcome",
        }
    }

    /// Canonical header spellings that resolve to this field.
    ///
    /// The first entry is the template's own header after canonicalization.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Field::Region => &["state/region_name", "sr", "region", "state_region"],
            Field::Facility => &["township_name", "tsp", "township", "facility"],
            Field::Year => &["year"],
            Field::Quarter => &["reporting_period", "qtr", "quarter"],
            Field::RegisterNumber => &["tpt_register_no.", "tpt_no", "tpt_register_no"],
            Field::Age => &["age"],
            Field::AgeGroup => &["age_group"],
            Field::Sex => &["sex", "gender"],
            Field::Hiv => &["hiv_status_(pos/neg/unk)", "hiv", "hiv_status"],
            Field::Regimen => &["tpt_regimens", "tpt_regimen", "regimen"],
            Field::Outcome => &["treatment_outcome", "outcome"],
        }
    }

    /// Resolve an already-canonicalized header to a field.
    pub fn from_canonical(header: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&header))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
