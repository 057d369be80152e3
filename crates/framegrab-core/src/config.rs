//! Frame store configuration.

use crate::error::{FrameError, Result};
use serde::{Deserialize, Serialize};

/// How per-plane strides reported by the source are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrideMode {
    /// Strides are recorded but ignored; rows are addressed as
    /// `row * width`. A source with padded rows produces skewed pixels.
    #[default]
    Packed,
    /// Rows are addressed as `row * stride` and compacted into tightly
    /// packed planes. A stride smaller than its row width is rejected.
    Honor,
}

/// Settings for a [`FrameStore`](crate::FrameStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub stride_mode: StrideMode,
    /// Emit a debug event with the source geometry on every ingest.
    pub log_frames: bool,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            stride_mode: StrideMode::Packed,
            log_frames: false,
        }
    }
}

impl FrameConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FrameError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| FrameError::Config(e.to_string()))
    }

    pub fn with_stride_mode(mut self, stride_mode: StrideMode) -> Self {
        self.stride_mode = stride_mode;
        self
    }
}
