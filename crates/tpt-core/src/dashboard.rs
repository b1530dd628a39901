//! The dashboard pipeline over one immutable snapshot.
//!
//! A [`Dashboard`] owns the normalized records. Every render is a pure
//! function of the snapshot and the filter spec passed in, so one snapshot
//! can serve any number of selections (and threads) without locking.

use std::path::Path;
use std::sync::OnceLock;

use tpt_ingest::read_tpt_csv;
use tpt_model::{FilterSpec, MetricsBundle, NormalizationOptions, PatientRecord};
use tpt_transform::{NormalizationReport, NormalizedTable, normalize_table};
use tracing::info;

use crate::error::{CoreError, Result};
use crate::filter::apply_filters;
use crate::metrics::compute_metrics;
use crate::scope::{DashboardDefault, FilterOptions, resolve_region_scope};

/// What the presentation layer should show for a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No record matched; show an explicit empty state instead of charts.
    Empty,
    Ready(Box<MetricsBundle>),
}

impl DashboardView {
    pub fn metrics(&self) -> Option<&MetricsBundle> {
        match self {
            DashboardView::Empty => None,
            DashboardView::Ready(bundle) => Some(bundle),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    records: Vec<PatientRecord>,
    report: NormalizationReport,
    options: FilterOptions,
}

impl Dashboard {
    pub fn new(table: NormalizedTable) -> Self {
        let options = FilterOptions::from_records(&table.records);
        Self {
            records: table.records,
            report: table.report,
            options,
        }
    }

    /// Read and normalize a register extract.
    pub fn load(path: &Path, options: &NormalizationOptions) -> Result<Self> {
        let raw = read_tpt_csv(path)?;
        let table = normalize_table(&raw, options)?;
        info!(
            path = %path.display(),
            records = table.records.len(),
            "snapshot ready"
        );
        Ok(Self::new(table))
    }

    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    pub fn report(&self) -> &NormalizationReport {
        &self.report
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn default_filter(&self) -> FilterSpec {
        FilterSpec::dashboard_default(&self.options)
    }

    /// Facilities offered for the region selection of `spec`.
    pub fn facility_options(&self, spec: &FilterSpec) -> Vec<String> {
        let region_scope = resolve_region_scope(&self.records, spec);
        FilterOptions::facilities_for(&self.records, &region_scope)
    }

    /// Filter and aggregate. An invalid spec is an error; an empty cohort is
    /// the [`DashboardView::Empty`] state.
    pub fn render(&self, spec: &FilterSpec) -> Result<DashboardView> {
        let (cohort, outcome_cohort) = apply_filters(&self.records, spec)?;
        match compute_metrics(&cohort, &outcome_cohort) {
            Ok(bundle) => Ok(DashboardView::Ready(Box::new(bundle))),
            Err(CoreError::EmptyCohort) => {
                info!("no records match the current filters");
                Ok(DashboardView::Empty)
            }
            Err(error) => Err(error),
        }
    }
}

/// Once-per-process holder of the normalized snapshot.
///
/// The loader runs on first access only. A failed load leaves the cell
/// empty so a later call can retry.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    cell: OnceLock<Dashboard>,
}

impl SnapshotCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Option<&Dashboard> {
        self.cell.get()
    }

    /// Return the snapshot, loading it with `load` if it is not there yet.
    ///
    /// When two threads race on the first access both may run `load`; the
    /// first stored result wins and the other is discarded.
    pub fn get_or_load<F>(&self, load: F) -> Result<&Dashboard>
    where
        F: FnOnce() -> Result<Dashboard>,
    {
        if let Some(dashboard) = self.cell.get() {
            return Ok(dashboard);
        }
        let dashboard = load()?;
        Ok(self.cell.get_or_init(|| dashboard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;
    use tpt_model::Selection;
    use tpt_transform::TransformError;

    fn dashboard() -> Dashboard {
        Dashboard::new(NormalizedTable {
            records: vec![
                record("Yangon", "Hlaing", 2022, 30),
                record("Yangon", "Insein", 2022, 40),
                record("Mandalay", "Chanmyathazi", 2023, 50),
            ],
            report: NormalizationReport::default(),
        })
    }

    #[test]
    fn default_render_is_yangon() {
        let dashboard = dashboard();
        let view = dashboard.render(&dashboard.default_filter()).unwrap();
        let metrics = view.metrics().unwrap();
        assert_eq!(metrics.total_cases, 2);
        assert_eq!(metrics.by_region.keys(), vec!["Yangon"]);
    }

    #[test]
    fn no_match_is_the_empty_state() {
        let dashboard = dashboard();
        let spec = FilterSpec {
            years: [1999].into_iter().collect(),
            ..dashboard.default_filter()
        };
        assert_eq!(dashboard.render(&spec).unwrap(), DashboardView::Empty);
    }

    #[test]
    fn facility_options_follow_region() {
        let dashboard = dashboard();
        let spec = FilterSpec {
            regions: Selection::only(["Mandalay"]),
            ..dashboard.default_filter()
        };
        assert_eq!(dashboard.facility_options(&spec), vec!["Chanmyathazi"]);
        let all = FilterSpec {
            regions: Selection::All,
            ..dashboard.default_filter()
        };
        assert_eq!(dashboard.facility_options(&all).len(), 3);
    }

    #[test]
    fn snapshot_loads_once() {
        let cell = SnapshotCell::new();
        let mut loads = 0;
        let first = cell
            .get_or_load(|| {
                loads += 1;
                Ok(dashboard())
            })
            .unwrap()
            .records()
            .len();
        let second = cell
            .get_or_load(|| {
                loads += 1;
                Ok(dashboard())
            })
            .unwrap()
            .records()
            .len();
        assert_eq!((first, second, loads), (3, 3, 1));
    }

    #[test]
    fn failed_load_can_be_retried() {
        let cell = SnapshotCell::new();
        let failed = cell.get_or_load(|| {
            Err(CoreError::Transform(TransformError::AllRowsDropped {
                rows: 1,
                missing_year: 1,
                missing_age: 0,
                negative_age: 0,
            }))
        });
        assert!(failed.is_err());
        assert!(cell.get().is_none());
        assert!(cell.get_or_load(|| Ok(dashboard())).is_ok());
    }
}
