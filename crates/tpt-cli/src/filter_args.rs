//! Filter selection from command-line flags.
//!
//! Precedence, lowest first: the dashboard default, a JSON filter file, then
//! individual flags. A flag replaces its whole dimension.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tpt_core::Dashboard;
use tpt_model::{AgeRange, FilterSpec, Selection, Sex};
use tpt_transform::expand_sex;

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Region to include (repeatable; `All` selects every region).
    #[arg(long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// Facility (township) to include (repeatable; `All` selects every
    /// facility of the selected regions).
    #[arg(long = "facility", value_name = "FACILITY")]
    pub facilities: Vec<String>,

    /// Enrollment year to include (repeatable).
    #[arg(long = "year", value_name = "YEAR")]
    pub years: Vec<i32>,

    /// Minimum age, inclusive.
    #[arg(long = "age-min", value_name = "AGE")]
    pub age_min: Option<u32>,

    /// Maximum age, inclusive.
    #[arg(long = "age-max", value_name = "AGE")]
    pub age_max: Option<u32>,

    /// Sex to include: Male, Female, or a register code (repeatable).
    #[arg(long = "sex", value_name = "SEX")]
    pub sexes: Vec<String>,

    /// TPT regimen to include (repeatable).
    #[arg(long = "regimen", value_name = "REGIMEN")]
    pub regimens: Vec<String>,

    /// JSON filter specification applied before the flags above.
    #[arg(long = "filter-file", value_name = "PATH")]
    pub filter_file: Option<PathBuf>,
}

impl FilterArgs {
    /// Build the filter spec for `dashboard`.
    pub fn to_spec(&self, dashboard: &Dashboard) -> Result<FilterSpec> {
        let mut spec = match &self.filter_file {
            Some(path) => read_filter_file(path)?,
            None => dashboard.default_filter(),
        };
        self.apply_to(&mut spec);
        Ok(spec)
    }

    /// Overwrite every dimension given on the command line.
    pub fn apply_to(&self, spec: &mut FilterSpec) {
        if !self.regions.is_empty() {
            spec.regions = Selection::from_choices(&self.regions);
        }
        if !self.facilities.is_empty() {
            spec.facilities = Selection::from_choices(&self.facilities);
        }
        if !self.years.is_empty() {
            spec.years = self.years.iter().copied().collect();
        }
        if self.age_min.is_some() || self.age_max.is_some() {
            spec.age = AgeRange::new(
                self.age_min.unwrap_or(spec.age.min),
                self.age_max.unwrap_or(spec.age.max),
            );
        }
        if !self.sexes.is_empty() {
            spec.sexes = self.sexes.iter().map(String::as_str).map(expand_sex).collect();
        }
        if !self.regimens.is_empty() {
            spec.regimens = self.regimens.iter().map(|r| r.trim().to_string()).collect();
        }
    }
}

/// Read a filter spec saved as JSON.
///
/// Sex entries accept register codes (`M`, `f`) as well as labels, like
/// `--sex`.
pub fn read_filter_file(path: &Path) -> Result<FilterSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read filter file {}", path.display()))?;
    let mut spec: FilterSpec = serde_json::from_str(&text)
        .with_context(|| format!("parse filter file {}", path.display()))?;
    spec.sexes = spec.sexes.into_iter().map(expand_sex_code).collect();
    Ok(spec)
}

fn expand_sex_code(sex: Sex) -> Sex {
    match sex {
        Sex::Unrecognized(code) => expand_sex(&code),
        known => known,
    }
}
