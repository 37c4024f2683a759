//! Configuration options for volumap.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Global configuration options for the volume pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Options {
    /// Number of bins the histogram builder produces.
    pub histogram_bins: usize,

    /// Peak opacity of a freshly seeded default transfer function.
    pub default_peak_opacity: f32,

    /// Whether a surface seeds a default transfer function from the value
    /// range of the first volume image pushed to it.
    pub seed_default_transfer: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            histogram_bins: 256,
            default_peak_opacity: 0.5,
            seed_default_transfer: true,
        }
    }
}

impl Options {
    /// Serializes the options to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes options from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid options JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
