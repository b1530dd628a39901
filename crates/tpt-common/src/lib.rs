//! Shared utilities for TPT crates.
//!
//! Polars cell conversion and the whole-number coercion used for
//! register years and ages exported from spreadsheets.

pub mod any_value;
pub mod number;

pub use any_value::cell_text;
pub use number::{NumberParseError, parse_whole_number};
