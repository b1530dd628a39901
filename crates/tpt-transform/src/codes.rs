//! Register code expansion.
//!
//! One lookup table per column, applied in a single pass. Codes outside the
//! table (after also accepting the full label) come back as `Unrecognized`
//! with the trimmed source text; callers decide whether to warn.

use tpt_model::{HivStatus, Outcome, Sex};

/// How codes are compared against a table's keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeMatch {
    /// `m` and `M` are the same code.
    CaseInsensitive,
    /// Only the exact key matches; `dc` is not `DC`.
    Exact,
}

struct CodeTable<T: 'static> {
    matching: CodeMatch,
    entries: &'static [(&'static str, T)],
}

impl<T: Clone> CodeTable<T> {
    fn lookup(&self, code: &str) -> Option<T> {
        let found = match self.matching {
            CodeMatch::CaseInsensitive => self
                .entries
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(code)),
            CodeMatch::Exact => self.entries.iter().find(|(key, _)| *key == code),
        };
        found.map(|(_, value)| value.clone())
    }
}

const SEX_CODES: CodeTable<Sex> = CodeTable {
    matching: CodeMatch::CaseInsensitive,
    entries: &[("M", Sex::Male), ("F", Sex::Female)],
};

const HIV_CODES: CodeTable<HivStatus> = CodeTable {
    matching: CodeMatch::CaseInsensitive,
    entries: &[
        ("P", HivStatus::Pos),
        ("N", HivStatus::Neg),
        ("U", HivStatus::Unk),
    ],
};

const OUTCOME_CODES: CodeTable<Outcome> = CodeTable {
    matching: CodeMatch::Exact,
    entries: &[
        ("C", Outcome::Complete),
        ("I", Outcome::Incomplete),
        ("TB", Outcome::DevelopTb),
        ("DC", Outcome::DiscontinueByPatient),
        ("SE", Outcome::DiscontinueSideEffect),
        ("N", Outcome::NotEvaluated),
        ("D", Outcome::Died),
    ],
};

/// Expand a sex code: `m`/`M` → Male, `f`/`F` → Female.
pub fn expand_sex(raw: &str) -> Sex {
    let code = raw.trim();
    SEX_CODES
        .lookup(code)
        .unwrap_or_else(|| Sex::from_label(code))
}

/// Expand an HIV status code: `p`/`n`/`u` in either case.
pub fn expand_hiv(raw: &str) -> HivStatus {
    let code = raw.trim();
    HIV_CODES
        .lookup(code)
        .unwrap_or_else(|| HivStatus::from_label(code))
}

/// Expand a treatment outcome code (`C`, `I`, `TB`, `DC`, `SE`, `N`, `D`).
///
/// Outcome codes are upper case on the register; other spellings are
/// unrecognized.
pub fn expand_outcome(raw: &str) -> Outcome {
    let code = raw.trim();
    OUTCOME_CODES
        .lookup(code)
        .unwrap_or_else(|| Outcome::from_label(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_is_case_insensitive() {
        assert_eq!(expand_sex("m"), Sex::Male);
        assert_eq!(expand_sex("M"), Sex::Male);
        assert_eq!(expand_sex(" f "), Sex::Female);
    }

    #[test]
    fn hiv_codes() {
        assert_eq!(expand_hiv("p"), HivStatus::Pos);
        assert_eq!(expand_hiv("N"), HivStatus::Neg);
        assert_eq!(expand_hiv("u"), HivStatus::Unk);
    }

    #[test]
    fn outcome_codes() {
        assert_eq!(expand_outcome("C"), Outcome::Complete);
        assert_eq!(expand_outcome("I"), Outcome::Incomplete);
        assert_eq!(expand_outcome("TB"), Outcome::DevelopTb);
        assert_eq!(expand_outcome("DC"), Outcome::DiscontinueByPatient);
        assert_eq!(expand_outcome("SE"), Outcome::DiscontinueSideEffect);
        assert_eq!(expand_outcome("N"), Outcome::NotEvaluated);
        assert_eq!(expand_outcome("D"), Outcome::Died);
    }

    #[test]
    fn outcome_codes_are_case_sensitive() {
        for code in ["c", "dc", "n", "d", "tb"] {
            assert_eq!(expand_outcome(code), Outcome::Unrecognized(code.to_string()));
        }
    }

    #[test]
    fn full_labels_are_accepted() {
        assert_eq!(expand_sex("Female"), Sex::Female);
        assert_eq!(expand_hiv("Unk"), HivStatus::Unk);
        assert_eq!(expand_outcome("Develop TB"), Outcome::DevelopTb);
    }

    #[test]
    fn unmapped_codes_pass_through() {
        assert_eq!(expand_sex("X"), Sex::Unrecognized("X".to_string()));
        assert_eq!(expand_hiv("R"), HivStatus::Unrecognized("R".to_string()));
        assert_eq!(
            expand_outcome("LTFU"),
            Outcome::Unrecognized("LTFU".to_string())
        );
    }
}
