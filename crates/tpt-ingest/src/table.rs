use tpt_model::Field;

use crate::header::resolve_columns;

/// Register rows restricted to recognised columns, cells kept as trimmed text.
///
/// Blank cells are `None`. Cell order in every row follows [`RawTable::fields`].
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    fields: Vec<Field>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(fields: Vec<Field>) -> Self {
        Self {
            fields,
            rows: Vec::new(),
        }
    }

    /// Build a table from raw headers and text rows, dropping unrecognised
    /// columns the same way the file readers do.
    pub fn from_text_rows<H, R, C>(headers: &[H], rows: R, source_name: &str) -> Self
    where
        H: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        let resolved = resolve_columns(headers, source_name);
        let mut table = RawTable::new(resolved.iter().flatten().copied().collect());
        for row in rows {
            let cells: Vec<Option<String>> = row
                .into_iter()
                .zip(&resolved)
                .filter(|(_, field)| field.is_some())
                .map(|(cell, _)| clean_cell(cell.as_ref()))
                .collect();
            table.push_row(cells);
        }
        table
    }

    /// Append a row. Short rows are padded with blanks.
    pub fn push_row(&mut self, mut cells: Vec<Option<String>>) {
        cells.resize(self.fields.len(), None);
        self.rows.push(cells);
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(|cells| RawRow {
            fields: &self.fields,
            cells,
        })
    }
}

/// Borrowed view of one register row.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    fields: &'a [Field],
    cells: &'a [Option<String>],
}

impl<'a> RawRow<'a> {
    /// Cell for `field`, `None` when the column is absent or the cell blank.
    pub fn get(&self, field: Field) -> Option<&'a str> {
        let idx = self.fields.iter().position(|f| *f == field)?;
        self.cells.get(idx)?.as_deref()
    }
}

pub(crate) fn clean_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
