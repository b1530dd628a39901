//! TPT register ingestion.
//!
//! Loads a register extract into a [`RawTable`]: one text cell per
//! recognised column per row. Physical formats other than CSV are read by
//! the caller into a polars `DataFrame` and handed to
//! [`raw_table_from_frame`].

pub mod error;
pub mod header;
pub mod reader;
pub mod table;

pub use error::{IngestError, Result};
pub use header::{canonical_header, resolve_columns, resolve_field};
pub use reader::{
    MAX_CSV_FILE_SIZE, check_file_size, raw_table_from_frame, read_tpt_csv, validate_encoding,
};
pub use table::{RawRow, RawTable};
