use thiserror::Error;

/// A filter specification that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("age range is inverted: min {min} > max {max}")]
    AgeRangeInverted { min: u32, max: u32 },
}
