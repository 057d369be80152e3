//! Color subsystem errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("dimension mismatch: expected {expected} pixels, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}
