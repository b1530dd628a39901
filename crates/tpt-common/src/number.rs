//! Whole-number coercion for text cells.

use thiserror::Error;

/// A cell that is present but cannot be read as a whole number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a whole number")]
pub struct NumberParseError {
    pub value: String,
}

/// Parses a text cell as a whole number.
///
/// Blank cells are `Ok(None)`. Spreadsheet exports write integer columns that
/// contain blanks as floats, so `"2022.0"` is accepted as `2022`; a real
/// fractional part is an error.
///
/// # Examples
///
/// ```
/// use tpt_common::parse_whole_number;
///
/// assert_eq!(parse_whole_number("2022"), Ok(Some(2022)));
/// assert_eq!(parse_whole_number("2022.0"), Ok(Some(2022)));
/// assert_eq!(parse_whole_number("  "), Ok(None));
/// assert!(parse_whole_number("2022.5").is_err());
/// assert!(parse_whole_number("FY22").is_err());
/// ```
pub fn parse_whole_number(value: &str) -> Result<Option<i64>, NumberParseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(Some(parsed));
    }
    let invalid = || NumberParseError {
        value: trimmed.to_string(),
    };
    let float = trimmed.parse::<f64>().map_err(|_| invalid())?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < 9.0e15 {
        Ok(Some(float as i64))
    } else {
        Err(invalid())
    }
}
