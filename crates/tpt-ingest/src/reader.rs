//! Register file reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;
use tpt_common::cell_text;
use tpt_model::Field;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::header::resolve_columns;
use crate::table::RawTable;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Columns without which no record can be normalized.
const REQUIRED_FIELDS: [Field; 2] = [Field::Year, Field::Age];

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Check file size before loading.
pub fn check_file_size(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }
    Ok(())
}

/// Reject UTF-16 input; a UTF-8 BOM is fine.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }
    Ok(())
}

/// Read a register CSV export.
///
/// Every column is read as text so that year and age coercion happen in one
/// place (normalization) with row-level error reporting.
pub fn read_tpt_csv(path: &Path) -> Result<RawTable> {
    check_file_size(path, MAX_CSV_FILE_SIZE)?;
    validate_encoding(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let table = raw_table_from_frame_named(&df, &path.display().to_string())?;
    info!(
        path = %path.display(),
        rows = table.len(),
        columns = table.fields().len(),
        "register extract loaded"
    );
    Ok(table)
}

/// Convert a frame produced by another loader (e.g. a spreadsheet reader).
pub fn raw_table_from_frame(df: &DataFrame) -> Result<RawTable> {
    raw_table_from_frame_named(df, "dataframe")
}

fn raw_table_from_frame_named(df: &DataFrame, source_name: &str) -> Result<RawTable> {
    let columns = df.get_columns();
    let headers: Vec<String> = columns
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    let resolved = resolve_columns(&headers, source_name);

    let kept: Vec<(&Column, Field)> = columns
        .iter()
        .zip(&resolved)
        .filter_map(|(column, field)| field.map(|field| (column, field)))
        .collect();
    for required in REQUIRED_FIELDS {
        if !kept.iter().any(|(_, field)| *field == required) {
            return Err(IngestError::MissingColumn {
                column: required.as_str(),
                source_name: source_name.to_string(),
            });
        }
    }
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            source_name: source_name.to_string(),
        });
    }
    debug!(
        source = source_name,
        dropped = headers.len() - kept.len(),
        "resolved register columns"
    );

    let mut table = RawTable::new(kept.iter().map(|(_, field)| *field).collect());
    for idx in 0..df.height() {
        let cells = kept
            .iter()
            .map(|(column, _)| cell_text(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        table.push_row(cells);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'Y', 0]);
        assert!(matches!(
            validate_encoding(file.path()),
            Err(IngestError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn size_limit_is_enforced() {
        let file = create_temp_csv(b"Year,Age\n2022,30\n");
        assert!(matches!(
            check_file_size(file.path(), 4),
            Err(IngestError::FileTooLarge { .. })
        ));
        assert!(check_file_size(file.path(), MAX_CSV_FILE_SIZE).is_ok());
    }

    #[test]
    fn frame_cells_become_text() {
        let df = DataFrame::new(vec![
            Column::new("Year".into(), vec![Some(2022.0), None]),
            Column::new("Age".into(), vec![34i64, 5]),
            Column::new("Sex".into(), vec!["m", "F"]),
        ])
        .unwrap();
        let table = raw_table_from_frame(&df).unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get(Field::Year), Some("2022"));
        assert_eq!(rows[1].get(Field::Year), None);
        assert_eq!(rows[1].get(Field::Age), Some("5"));
        assert_eq!(rows[0].get(Field::Sex), Some("m"));
    }

    #[test]
    fn frame_without_age_is_rejected() {
        let df = DataFrame::new(vec![Column::new("Year".into(), vec![2022i64])]).unwrap();
        assert!(matches!(
            raw_table_from_frame(&df),
            Err(IngestError::MissingColumn { column: "age", .. })
        ));
    }
}
