//! Presentation of dashboard metrics.
//!
//! - **table**: comfy-table rendering for the terminal
//! - **export**: JSON and per-table CSV files

pub mod error;
pub mod export;
pub mod table;

pub use error::{ReportError, Result};
pub use export::{write_count_csvs, write_count_table, write_metrics_json};
pub use table::{format_percent, render_options, render_tables, render_view};
