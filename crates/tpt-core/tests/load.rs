//! Loading a register extract from disk into a dashboard snapshot.

use std::io::Write;

use tempfile::NamedTempFile;
use tpt_core::{CoreError, Dashboard, DashboardView};
use tpt_model::{FilterSpec, NormalizationOptions, Selection};
use tpt_transform::TransformError;

const EXTRACT: &str = "\
SR,TSP,Year,Qtr,Age,Sex,HIV,TPT Regimens,Outcome
Yangon,Hlaing,2022,Q1,34,m,p,3HP,C
Yangon,Hlaing,2022,Q2,8,F,u,3HP,DC
Yangon,Insein,2022,Q3,41,M,n,6H,
Yangon,Insein,2021,Q4,29,f,U,3HP,C
Mandalay,Chanmyathazi,2022,Q1,52,m,p,6H,D
Mandalay,Chanmyathazi,,Q1,52,m,p,6H,D
";

fn write_extract(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn default_view_of_an_extract() {
    let file = write_extract(EXTRACT);
    let dashboard = Dashboard::load(file.path(), &NormalizationOptions::default()).unwrap();
    assert_eq!(dashboard.records().len(), 5);
    assert_eq!(dashboard.report().dropped_missing_year, 1);
    assert_eq!(dashboard.options().regions, vec!["Mandalay", "Yangon"]);

    let spec = FilterSpec {
        years: [2022].into_iter().collect(),
        ..dashboard.default_filter()
    };
    let view = dashboard.render(&spec).unwrap();
    let metrics = view.metrics().unwrap();
    assert_eq!(metrics.total_cases, 3);
    assert_eq!(metrics.by_sex.get("Male"), 2);
    assert_eq!(metrics.by_sex.get("Female"), 1);
    // Pos + Neg over Pos + Neg + Unk.
    assert_eq!(metrics.hiv_coverage.known, 2);
    assert_eq!(metrics.hiv_coverage.unknown, 1);
    // Outcomes of 2021 enrollments are reported in 2022.
    assert_eq!(metrics.outcome_cases, 1);
    assert_eq!(metrics.treatment_success.percent, Some(100.0));
    assert_eq!(metrics.by_facility.rows[0].key, "Hlaing");
    assert_eq!(metrics.by_facility.rows[0].serial, 1);
}

#[test]
fn unmatched_selection_renders_empty() {
    let file = write_extract(EXTRACT);
    let dashboard = Dashboard::load(file.path(), &NormalizationOptions::default()).unwrap();
    let spec = FilterSpec {
        regions: Selection::only(["Shan"]),
        ..dashboard.default_filter()
    };
    assert_eq!(dashboard.render(&spec).unwrap(), DashboardView::Empty);
}

#[test]
fn extract_without_any_year_fails() {
    let file = write_extract("Year,Age\n,30\n,31\n");
    let error = Dashboard::load(file.path(), &NormalizationOptions::default()).unwrap_err();
    assert!(matches!(
        error,
        CoreError::Transform(TransformError::AllRowsDropped { rows: 2, .. })
    ));
}
