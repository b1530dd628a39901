//! Categorical register values.
//!
//! Every enum keeps an `Unrecognized` variant carrying the source code
//! verbatim: codes outside the lookup tables are passed through rather than
//! rejected. All of them serialize as their display label.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Sex {
    Male,
    Female,
    Unrecognized(String),
}

impl Sex {
    pub fn label(&self) -> &str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Unrecognized(code) => code,
        }
    }

    /// Parse a display label (not a register code).
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Male" => Sex::Male,
            "Female" => Sex::Female,
            other => Sex::Unrecognized(other.to_string()),
        }
    }
}

/// HIV test status at enrollment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum HivStatus {
    Pos,
    Neg,
    Unk,
    Unrecognized(String),
}

impl HivStatus {
    pub fn label(&self) -> &str {
        match self {
            HivStatus::Pos => "Pos",
            HivStatus::Neg => "Neg",
            HivStatus::Unk => "Unk",
            HivStatus::Unrecognized(code) => code,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Pos" => HivStatus::Pos,
            "Neg" => HivStatus::Neg,
            "Unk" => HivStatus::Unk,
            other => HivStatus::Unrecognized(other.to_string()),
        }
    }

    /// Returns true for a recorded test result (Pos or Neg).
    pub fn is_known(&self) -> bool {
        matches!(self, HivStatus::Pos | HivStatus::Neg)
    }
}

/// TPT treatment outcome.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Outcome {
    Complete,
    Incomplete,
    DevelopTb,
    DiscontinueByPatient,
    DiscontinueSideEffect,
    NotEvaluated,
    Died,
    Unrecognized(String),
}

impl Outcome {
    pub const KNOWN: [Outcome; 7] = [
        Outcome::Complete,
        Outcome::Incomplete,
        Outcome::DevelopTb,
        Outcome::DiscontinueByPatient,
        Outcome::DiscontinueSideEffect,
        Outcome::NotEvaluated,
        Outcome::Died,
    ];

    pub fn label(&self) -> &str {
        match self {
            Outcome::Complete => "Complete",
            Outcome::Incomplete => "Incomplete",
            Outcome::DevelopTb => "Develop TB",
            Outcome::DiscontinueByPatient => "Discontinue by patient",
            Outcome::DiscontinueSideEffect => "Discontinue due to Side Effect",
            Outcome::NotEvaluated => "Not evaluated",
            Outcome::Died => "Died",
            Outcome::Unrecognized(code) => code,
        }
    }

    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        Outcome::KNOWN
            .into_iter()
            .find(|outcome| outcome.label() == trimmed)
            .unwrap_or_else(|| Outcome::Unrecognized(trimmed.to_string()))
    }

    /// Binary recode used for the treatment success rate.
    ///
    /// Unrecognized codes fall in neither bucket.
    pub fn treatment_result(&self) -> Option<TreatmentResult> {
        match self {
            Outcome::Complete => Some(TreatmentResult::Success),
            Outcome::Unrecognized(_) => None,
            _ => Some(TreatmentResult::NotSuccess),
        }
    }
}

/// Treatment success recode of [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TreatmentResult {
    Success,
    NotSuccess,
}

impl TreatmentResult {
    pub fn label(&self) -> &'static str {
        match self {
            TreatmentResult::Success => "Tx success",
            TreatmentResult::NotSuccess => "Tx not success",
        }
    }
}

macro_rules! label_conversions {
    ($($ty:ident),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.label().to_string()
                }
            }

            impl From<String> for $ty {
                fn from(value: String) -> Self {
                    $ty::from_label(&value)
                }
            }
        )+
    };
}

label_conversions!(Sex, HivStatus, Outcome);

impl fmt::Display for TreatmentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
