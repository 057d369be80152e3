//! Error types for FrameGrab.

use crate::frame::PlaneKind;
use thiserror::Error;

/// Errors raised while ingesting a planar frame.
///
/// Any of these leaves the [`FrameStore`](crate::FrameStore) invalidated:
/// all three planes are cleared before the error is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("{plane} plane too short: need {required} bytes, got {actual}")]
    PlaneTooShort {
        plane: PlaneKind,
        required: usize,
        actual: usize,
    },

    #[error("{plane} plane stride {stride} is smaller than its row width {row_width}")]
    StrideTooSmall {
        plane: PlaneKind,
        stride: usize,
        row_width: usize,
    },

    #[error("Unsupported rotation: {0} degrees")]
    UnsupportedRotation(i32),

    #[error("Unsupported source buffer: {0}")]
    UnsupportedSource(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for FrameGrab operations.
pub type Result<T> = std::result::Result<T, FrameError>;
