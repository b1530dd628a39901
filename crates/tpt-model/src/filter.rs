//! Filter specification value objects.
//!
//! A `FilterSpec` is owned by the presentation layer and handed to the filter
//! engine by reference; nothing in the pipeline keeps or mutates it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::Sex;
use crate::error::FilterError;

/// The literal a user picks to mean "every option".
pub const ALL_SENTINEL: &str = "All";

/// Region or facility selection.
///
/// `All` is resolved against the record set before filtering, so it always
/// means "every value currently offered", never a global constant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Only(values.into_iter().map(Into::into).collect())
    }

    /// Build a selection from widget choices, where `All` anywhere in the
    /// list selects every option.
    pub fn from_choices<S: AsRef<str>>(choices: &[S]) -> Self {
        if choices
            .iter()
            .any(|choice| choice.as_ref().trim().eq_ignore_ascii_case(ALL_SENTINEL))
        {
            Selection::All
        } else {
            Selection::only(choices.iter().map(|choice| choice.as_ref().trim().to_string()))
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Inclusive age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u32,
    pub max: u32,
}

impl AgeRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, age: u32) -> bool {
        self.min <= age && age <= self.max
    }
}

/// Which year a cohort is matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearBasis {
    /// Enrollment year: volume and demographic metrics.
    Enrollment,
    /// Enrollment year + 1: outcome and TSR metrics.
    Reported,
}

/// Multi-dimensional cohort filter.
///
/// Dimensions are combined with AND; values inside a dimension with OR.
/// An empty set in any dimension matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub regions: Selection,
    #[serde(default)]
    pub facilities: Selection,
    pub years: BTreeSet<i32>,
    pub age: AgeRange,
    pub sexes: BTreeSet<Sex>,
    pub regimens: BTreeSet<String>,
}

impl FilterSpec {
    /// Reject specifications that cannot describe any cohort.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.age.min > self.age.max {
            return Err(FilterError::AgeRangeInverted {
                min: self.age.min,
                max: self.age.max,
            });
        }
        Ok(())
    }
}
