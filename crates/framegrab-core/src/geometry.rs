//! Crop geometry: centred square windows and the byte-range plans that copy them.

use crate::error::{FrameError, Result};
use crate::frame::{ChromaSubsampling, PlaneKind};
use serde::{Deserialize, Serialize};

/// A square crop must remove a multiple of this many samples: the amount is
/// halved once per side and again for 2×2 chroma blocks, and both halvings
/// have to land on whole samples.
pub const CROP_ALIGNMENT: u32 = 4;

/// Axis-aligned window into a plane, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Create a new window.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole of a `width × height` plane.
    #[inline]
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// The chroma window covering the same picture area as this luma window.
    pub fn subsampled(self, subsampling: ChromaSubsampling) -> Self {
        match subsampling {
            ChromaSubsampling::Yuv420 => {
                Self::new(self.x / 2, self.y / 2, self.width / 2, self.height / 2)
            }
            ChromaSubsampling::Yuv422 => Self::new(self.x / 2, self.y, self.width / 2, self.height),
        }
    }
}

/// Centred square window for a `width × height` luma plane.
///
/// Returns `None` when the amount to remove is not a multiple of
/// [`CROP_ALIGNMENT`]; callers fall back to an uncropped copy. A square input
/// yields the full frame.
pub fn square_crop(width: u32, height: u32) -> Option<CropRect> {
    if width > height {
        let crop = width - height;
        (crop % CROP_ALIGNMENT == 0).then(|| CropRect::new(crop / 2, 0, height, height))
    } else {
        let crop = height - width;
        (crop % CROP_ALIGNMENT == 0).then(|| CropRect::new(0, crop / 2, width, width))
    }
}

/// How to move a window out of a source plane whose rows are `pitch` bytes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropPlan {
    /// Columns are dropped (or rows are padded): copy one row at a time,
    /// staging each through a scratch row buffer.
    Rows {
        offset: usize,
        pitch: usize,
        row_len: usize,
        rows: usize,
    },
    /// Only whole rows are dropped: one contiguous copy.
    Contiguous { offset: usize, len: usize },
}

impl CropPlan {
    pub fn new(rect: CropRect, pitch: usize) -> Self {
        let row_len = rect.width as usize;
        let rows = rect.height as usize;
        let offset = rect.y as usize * pitch + rect.x as usize;
        if rect.x == 0 && row_len == pitch {
            Self::Contiguous {
                offset,
                len: row_len * rows,
            }
        } else {
            Self::Rows {
                offset,
                pitch,
                row_len,
                rows,
            }
        }
    }

    /// Bytes written to the destination.
    pub fn output_len(&self) -> usize {
        match *self {
            Self::Rows { row_len, rows, .. } => row_len * rows,
            Self::Contiguous { len, .. } => len,
        }
    }

    /// Whether [`copy_into`](Self::copy_into) needs a scratch row buffer.
    #[inline]
    pub fn needs_row_buffer(&self) -> bool {
        matches!(self, Self::Rows { .. })
    }

    /// Smallest source length this plan can read from.
    pub fn required_source_len(&self) -> usize {
        match *self {
            Self::Rows {
                offset,
                pitch,
                row_len,
                rows,
            } => {
                if rows == 0 || row_len == 0 {
                    0
                } else {
                    offset + (rows - 1) * pitch + row_len
                }
            }
            Self::Contiguous { offset, len } => {
                if len == 0 {
                    0
                } else {
                    offset + len
                }
            }
        }
    }

    /// Copy the window from `src` into `dst`, which must be exactly
    /// [`output_len`](Self::output_len) bytes.
    ///
    /// # Panics
    ///
    /// A row-wise plan called without a scratch row, or with one shorter than
    /// a cropped row, is a caller bug and panics.
    pub fn copy_into(
        &self,
        dst: &mut [u8],
        src: &[u8],
        row: Option<&mut [u8]>,
        plane: PlaneKind,
    ) -> Result<()> {
        debug_assert_eq!(dst.len(), self.output_len());

        let required = self.required_source_len();
        if src.len() < required {
            return Err(FrameError::PlaneTooShort {
                plane,
                required,
                actual: src.len(),
            });
        }

        match *self {
            Self::Rows {
                offset,
                pitch,
                row_len,
                ..
            } => {
                let Some(row) = row else {
                    panic!("row-wise crop of the {plane} plane needs a scratch row buffer");
                };
                assert!(
                    row.len() >= row_len,
                    "scratch row buffer holds {} bytes, a cropped row needs {row_len}",
                    row.len()
                );
                if row_len == 0 {
                    return Ok(());
                }
                let row = &mut row[..row_len];
                for (i, out) in dst.chunks_exact_mut(row_len).enumerate() {
                    let start = offset + i * pitch;
                    row.copy_from_slice(&src[start..start + row_len]);
                    out.copy_from_slice(row);
                }
            }
            Self::Contiguous { offset, len } => {
                if len > 0 {
                    dst.copy_from_slice(&src[offset..offset + len]);
                }
            }
        }
        Ok(())
    }
}
