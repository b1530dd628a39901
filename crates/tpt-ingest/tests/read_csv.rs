use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tpt_ingest::{IngestError, read_tpt_csv};
use tpt_model::Field;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn reads_template_export() {
    let dir = TempDir::new().expect("temp dir");
    let contents = "\u{feff}State/Region Name,Township Name,Month,Year,Reporting Period,\"HIV status (Pos/Neg/Unk)\nselect one\",Age,Sex,TPT Regimens,Treatment Outcome,Remark\n\
Yangon,Hlaing,Jan,2022,Q1,p,34,m,3HP,C,\n\
Yangon,Insein,Feb,,Q1,N,5,F,6H,,lost card\n";
    let path = write_csv(&dir, "tpt.csv", contents);

    let table = read_tpt_csv(&path).expect("read register");

    assert_eq!(
        table.fields(),
        &[
            Field::Region,
            Field::Facility,
            Field::Year,
            Field::Quarter,
            Field::Hiv,
            Field::Age,
            Field::Sex,
            Field::Regimen,
            Field::Outcome,
        ]
    );
    assert_eq!(table.len(), 2);
    let rows: Vec<_> = table.rows().collect();
    assert_eq!(rows[0].get(Field::Hiv), Some("p"));
    assert_eq!(rows[0].get(Field::Year), Some("2022"));
    assert_eq!(rows[1].get(Field::Year), None);
    assert_eq!(rows[1].get(Field::Outcome), None);
}

#[test]
fn missing_year_column_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "no_year.csv", "Age,Sex\n30,M\n");
    let err = read_tpt_csv(&path).expect_err("year is required");
    assert!(matches!(err, IngestError::MissingColumn { column: "year", .. }));
}

#[test]
fn header_only_file_is_empty() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "empty.csv", "Year,Age\n");
    let err = read_tpt_csv(&path).expect_err("no rows");
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_tpt_csv(&dir.path().join("absent.csv")).expect_err("absent");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
