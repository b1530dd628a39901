//! TPT register transformation.
//!
//! - **codes**: lookup-table expansion of sex, HIV and outcome codes
//! - **derive**: age bands and the lagged reporting year
//! - **normalize**: row cleaning from a raw table to patient records

pub mod codes;
pub mod derive;
pub mod error;
pub mod normalize;

pub use codes::{expand_hiv, expand_outcome, expand_sex};
pub use derive::{age_group_detail, broad_age_group, reported_year};
pub use error::TransformError;
pub use normalize::{NormalizationReport, NormalizedTable, normalize_table};
