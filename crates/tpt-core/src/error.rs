use thiserror::Error;
use tpt_ingest::IngestError;
use tpt_model::FilterError;
use tpt_transform::TransformError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] FilterError),

    /// No record matched the filter; metrics are not computed.
    #[error("no records match the current filters")]
    EmptyCohort,

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
