//! FrameGrab Color — YUV to ARGB conversion.
//!
//! Turns the planes held by a [`FrameStore`] into an orientation-corrected
//! [`ArgbImage`] that a presentation layer can wrap as a bitmap.

pub mod converter;
pub mod error;
pub mod image;
pub mod kernel;

pub use converter::PixelConverter;
pub use error::ColorError;
pub use image::ArgbImage;
pub use kernel::{pack_argb, sample_to_argb, unpack_argb, yuv_to_argb};

use framegrab_core::{FrameConfig, FrameStore, IngestOptions, PlanarSource};

/// One-shot conversion of a source frame, without cropping.
///
/// Returns `None` when the source cannot be ingested.
pub fn frame_to_argb<S: PlanarSource + ?Sized>(source: &S) -> Option<ArgbImage> {
    let store = FrameStore::from_source(source, IngestOptions::default(), FrameConfig::default());
    PixelConverter::new().convert_store(&store)
}
