//! Error types for register ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a register extract.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Register file not found.
    #[error("register file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the size limit.
    #[error("file too large: {path} ({size} bytes, max {max_size} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Only UTF-8 input is supported.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// The extract has a header but no data rows.
    #[error("register extract has no rows: {source_name}")]
    EmptyCsv { source_name: String },

    /// A column the pipeline cannot work without is absent.
    #[error("required column '{column}' not found in {source_name}")]
    MissingColumn {
        column: &'static str,
        source_name: String,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
