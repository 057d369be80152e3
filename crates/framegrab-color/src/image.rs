//! Interleaved ARGB output image.

use crate::error::ColorError;
use crate::kernel::unpack_argb;

/// A converted frame as packed `0xAARRGGBB` pixels in row-major order.
///
/// Always freshly owned; it never aliases the planes it was converted from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgbImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl ArgbImage {
    /// Wrap a pixel buffer, checking it matches the dimensions.
    pub fn new(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, ColorError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ColorError::DimensionMismatch {
                expected,
                got: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Row `y` of the image.
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        let w = self.width as usize;
        let start = (y as usize).checked_mul(w)?;
        self.pixels.get(start..start + w)
    }

    /// Raw pixel memory in native byte order, for zero-copy upload to a
    /// platform bitmap that expects 32-bit ARGB words.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Drop alpha and emit `RGB` byte triples.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &p in &self.pixels {
            let [_, r, g, b] = unpack_argb(p);
            out.extend_from_slice(&[r, g, b]);
        }
        out
    }

    /// Reorder to `RGBA` byte quads.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &p in &self.pixels {
            let [a, r, g, b] = unpack_argb(p);
            out.extend_from_slice(&[r, g, b, a]);
        }
        out
    }
}
