//! Age bands used for demographic breakdowns.
//!
//! Bands are half-open on the upper end: a patient aged exactly 5 belongs to
//! `5-9 yrs`, not `0-4 yrs`. The band functions themselves live in
//! `tpt_transform::derive`; these types only fix the labels and ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Nine-band age classification.
///
/// Variants are declared youngest first so the derived `Ord` is chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroupDetail {
    #[serde(rename = "0-4 yrs")]
    Under5,
    #[serde(rename = "5-9 yrs")]
    From5To9,
    #[serde(rename = "10-14 yrs")]
    From10To14,
    #[serde(rename = "15-24 yrs")]
    From15To24,
    #[serde(rename = "25-34 yrs")]
    From25To34,
    #[serde(rename = "35-44 yrs")]
    From35To44,
    #[serde(rename = "45-54 yrs")]
    From45To54,
    #[serde(rename = "55-64 yrs")]
    From55To64,
    #[serde(rename = "> 65 yrs")]
    From65,
}

impl AgeGroupDetail {
    pub const ALL: [AgeGroupDetail; 9] = [
        AgeGroupDetail::Under5,
        AgeGroupDetail::From5To9,
        AgeGroupDetail::From10To14,
        AgeGroupDetail::From15To24,
        AgeGroupDetail::From25To34,
        AgeGroupDetail::From35To44,
        AgeGroupDetail::From45To54,
        AgeGroupDetail::From55To64,
        AgeGroupDetail::From65,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroupDetail::Under5 => "0-4 yrs",
            AgeGroupDetail::From5To9 => "5-9 yrs",
            AgeGroupDetail::From10To14 => "10-14 yrs",
            AgeGroupDetail::From15To24 => "15-24 yrs",
            AgeGroupDetail::From25To34 => "25-34 yrs",
            AgeGroupDetail::From35To44 => "35-44 yrs",
            AgeGroupDetail::From45To54 => "45-54 yrs",
            AgeGroupDetail::From55To64 => "55-64 yrs",
            AgeGroupDetail::From65 => "> 65 yrs",
        }
    }

    /// Inclusive lower bound of the band.
    pub fn lower_bound(&self) -> u32 {
        match self {
            AgeGroupDetail::Under5 => 0,
            AgeGroupDetail::From5To9 => 5,
            AgeGroupDetail::From10To14 => 10,
            AgeGroupDetail::From15To24 => 15,
            AgeGroupDetail::From25To34 => 25,
            AgeGroupDetail::From35To44 => 35,
            AgeGroupDetail::From45To54 => 45,
            AgeGroupDetail::From55To64 => 55,
            AgeGroupDetail::From65 => 65,
        }
    }
}

impl fmt::Display for AgeGroupDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Four-band age classification printed on the paper register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "0-4 yrs")]
    Under5,
    #[serde(rename = "5-14 yrs")]
    From5To14,
    #[serde(rename = "15-60 yrs")]
    From15To60,
    #[serde(rename = "> 60 yrs")]
    Over60,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::Under5,
        AgeGroup::From5To14,
        AgeGroup::From15To60,
        AgeGroup::Over60,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Under5 => "0-4 yrs",
            AgeGroup::From5To14 => "5-14 yrs",
            AgeGroup::From15To60 => "15-60 yrs",
            AgeGroup::Over60 => "> 60 yrs",
        }
    }

    pub fn rank_of_label(label: &str) -> Option<usize> {
        AgeGroup::ALL.iter().position(|band| band.label() == label)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
