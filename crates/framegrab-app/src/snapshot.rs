//! Encoding converted frames with the `image` crate.

use anyhow::{anyhow, Context, Result};
use framegrab_color::ArgbImage;
use image::RgbImage;
use std::path::Path;

/// Drop alpha and wrap the pixels as an `RgbImage`.
pub fn to_rgb_image(image: &ArgbImage) -> Result<RgbImage> {
    RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .ok_or_else(|| anyhow!("failed to wrap {}x{} frame as an image", image.width, image.height))
}

/// Save `image` to `path`; the format follows the file extension (`.ppm`, `.png`, ...).
pub fn save(image: &ArgbImage, path: &Path) -> Result<()> {
    to_rgb_image(image)?
        .save(path)
        .with_context(|| format!("writing {}", path.display()))
}
