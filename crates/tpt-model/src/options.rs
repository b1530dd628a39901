//! Configuration options for register normalization.

use serde::{Deserialize, Serialize};

/// Options for normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationOptions {
    /// Log each distinct unmapped sex/HIV/outcome code once at warn level.
    /// Unmapped codes are passed through either way.
    pub warn_on_unmapped: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            warn_on_unmapped: true,
        }
    }
}

impl NormalizationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unmapped_warnings(mut self, enable: bool) -> Self {
        self.warn_on_unmapped = enable;
        self
    }
}
