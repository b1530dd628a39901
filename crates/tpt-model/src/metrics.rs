//! Aggregation output handed to the presentation layer.

use serde::{Deserialize, Serialize};

/// One `(key, count)` pair of a grouped count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    pub key: String,
    pub count: usize,
}

/// Ordered grouped counts. Row order is the display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTable {
    pub rows: Vec<CountRow>,
}

impl CountTable {
    pub fn new(rows: Vec<CountRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count for `key`, zero when the group is absent.
    pub fn get(&self, key: &str) -> usize {
        self.rows
            .iter()
            .find(|row| row.key == key)
            .map_or(0, |row| row.count)
    }

    pub fn total(&self) -> usize {
        self.rows.iter().map(|row| row.count).sum()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.key.as_str()).collect()
    }
}

/// A count row with its 1-based position in descending-count order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedRow {
    pub serial: usize,
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCountTable {
    pub rows: Vec<RankedRow>,
}

impl RankedCountTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Count for a `(group, key)` pair, e.g. region × sex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossCountRow {
    pub group: String,
    pub key: String,
    pub count: usize,
}

/// HIV testing coverage: share of the cohort with a Pos or Neg result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HivCoverage {
    pub known: usize,
    pub unknown: usize,
    /// `None` when `known + unknown == 0`.
    pub percent: Option<f64>,
}

/// Treatment success rate over the outcome cohort.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreatmentSuccess {
    pub success: usize,
    pub not_success: usize,
    /// `None` when `success + not_success == 0`.
    pub percent: Option<f64>,
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsBundle {
    pub total_cases: usize,
    pub by_year: CountTable,
    pub by_quarter: CountTable,
    /// Descending by count.
    pub by_region: CountTable,
    pub by_facility: RankedCountTable,
    pub by_region_sex: Vec<CrossCountRow>,
    pub by_sex: CountTable,
    pub by_age_group: CountTable,
    pub by_age_group_detail: CountTable,
    pub by_regimen: CountTable,
    pub by_hiv: CountTable,
    pub hiv_coverage: HivCoverage,
    /// Size of the outcome (reported-year) cohort.
    pub outcome_cases: usize,
    pub by_outcome: CountTable,
    pub treatment_success: TreatmentSuccess,
}
