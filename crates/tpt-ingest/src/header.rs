//! Header canonicalization.

use std::collections::BTreeSet;

use tpt_model::Field;
use tracing::{debug, warn};

/// Reduce a raw header cell to its canonical identifier.
///
/// Only the first line of a multi-line header is kept (the template puts
/// entry instructions below the label). The result is lowercase with runs of
/// whitespace replaced by a single `_`.
///
/// # Examples
///
/// ```
/// use tpt_ingest::canonical_header;
///
/// assert_eq!(canonical_header("State/Region Name\n(select)"), "state/region_name");
/// assert_eq!(canonical_header("\u{feff}  TPT Regimens "), "tpt_regimens");
/// ```
pub fn canonical_header(raw: &str) -> String {
    let first_line = raw
        .trim_matches('\u{feff}')
        .split('\n')
        .next()
        .unwrap_or_default();
    first_line
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Resolve a raw header cell to a register field.
pub fn resolve_field(raw: &str) -> Option<Field> {
    Field::from_canonical(&canonical_header(raw))
}

/// Resolve every header of an extract.
///
/// Unrecognised columns map to `None` and are dropped by the caller. When
/// two columns resolve to the same field only the first is kept.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S], source_name: &str) -> Vec<Option<Field>> {
    let mut seen = BTreeSet::new();
    headers
        .iter()
        .map(|header| {
            let raw = header.as_ref();
            let Some(field) = resolve_field(raw) else {
                debug!(source = source_name, column = %canonical_header(raw), "dropping unrecognised column");
                return None;
            };
            if seen.insert(field) {
                Some(field)
            } else {
                warn!(
                    source = source_name,
                    column = %canonical_header(raw),
                    field = %field,
                    "duplicate column for field, keeping the first"
                );
                None
            }
        })
        .collect()
}
