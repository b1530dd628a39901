//! Register cells read through Polars.
//!
//! The CSV reader hands over text, spreadsheet loaders hand over integers or
//! floats. Both end up as the trimmed text normalization parses.

use polars::prelude::AnyValue;

/// Text of one register cell, `None` when the cell is null or blank.
///
/// Floats print without a fractional part when they are whole, so a year
/// stored as `2022.0` reads back as `2022`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tpt_common::cell_text;
///
/// assert_eq!(cell_text(AnyValue::Null), None);
/// assert_eq!(cell_text(AnyValue::String("  ")), None);
/// assert_eq!(cell_text(AnyValue::Float64(2022.0)).as_deref(), Some("2022"));
/// assert_eq!(cell_text(AnyValue::String(" Yangon ")).as_deref(), Some("Yangon"));
/// ```
pub fn cell_text(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        // f64 Display drops the `.0` of whole values.
        AnyValue::Float32(v) => f64::from(v).to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        other => other.to_string().trim_matches('"').trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}
