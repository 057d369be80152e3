//! FrameGrab Core - planar YUV frame storage
//!
//! This crate provides:
//! - Borrowed source frames and the `PlanarSource` seam for video sources
//! - `FrameStore`, which ingests frames into reusable Y/U/V buffers
//! - Centre square cropping that keeps chroma subsampling aligned
//! - Rotation metadata carried through to pixel conversion

pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod rotation;
pub mod store;

pub use config::{FrameConfig, StrideMode};
pub use error::{FrameError, Result};
pub use frame::{
    ChromaSubsampling, PlanarFrame, PlanarSource, PlaneKind, Planes, SourceFrame, SourcePlane,
};
pub use geometry::{square_crop, CropPlan, CropRect, CROP_ALIGNMENT};
pub use rotation::Rotation;
pub use store::{reuse_or_resize, FrameStore, IngestOptions, IngestReport, ProcessingMode};
