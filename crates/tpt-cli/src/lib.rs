//! CLI library components for the TPT dashboard.

pub mod filter_args;
pub mod logging;
