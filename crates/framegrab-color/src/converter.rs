//! Planar YUV → ARGB conversion with rotation applied during placement.
//!
//! Rotation is split into two independent effects evaluated per pixel:
//! a transpose (`needs_swap`, the 90° family) and a reflection of the
//! destination index through the pixel count (`needs_mirror`). Together they
//! cover all four right-angle orientations, so every converted sample is
//! written straight to its final slot with no intermediate rotation buffer.

use crate::image::ArgbImage;
use crate::kernel::yuv_to_argb;
use framegrab_core::{ChromaSubsampling, FrameStore, PlanarFrame, Planes};
use tracing::trace;

/// Converts stored planar frames to ARGB images.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelConverter {
    subsampling: Option<ChromaSubsampling>,
}

impl PixelConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a chroma layout, overriding the frame's tag and the length heuristic.
    pub fn with_subsampling(subsampling: ChromaSubsampling) -> Self {
        Self {
            subsampling: Some(subsampling),
        }
    }

    /// Convert `frame`, or return `None` when it holds no planes.
    pub fn convert(&self, frame: &PlanarFrame) -> Option<ArgbImage> {
        let planes = frame.planes()?;
        let subsampling = match self.subsampling {
            Some(s) => s,
            None => frame.effective_subsampling()?,
        };

        let geometry = Placement::new(frame);
        let mut pixels = vec![0u32; geometry.size];
        match subsampling {
            ChromaSubsampling::Yuv420 => convert_420(planes, &geometry, &mut pixels),
            ChromaSubsampling::Yuv422 => convert_422(planes, &geometry, &mut pixels),
        }

        let (width, height) = frame.rotation.output_size(frame.width, frame.height);
        trace!(
            width,
            height,
            rotation = frame.rotation.degrees(),
            ?subsampling,
            "Converted frame to ARGB"
        );
        Some(ArgbImage {
            width,
            height,
            pixels,
        })
    }

    /// Convert the frame held by `store` under its lock.
    pub fn convert_store(&self, store: &FrameStore) -> Option<ArgbImage> {
        store.with_frame(|frame| self.convert(frame))
    }
}

/// Source geometry plus the rotation decomposition.
struct Placement {
    width: usize,
    height: usize,
    size: usize,
    swap: bool,
    mirror: bool,
}

impl Placement {
    fn new(frame: &PlanarFrame) -> Self {
        let width = frame.width as usize;
        let height = frame.height as usize;
        Self {
            width,
            height,
            size: width * height,
            swap: frame.rotation.needs_swap(),
            mirror: frame.rotation.needs_mirror(),
        }
    }

    /// Destination of the pixel at source `(row, col)` before mirroring:
    /// unrotated row-major, or transposed into a `height`-wide image with the
    /// source rows running right to left.
    #[inline]
    fn slot(&self, row: usize, col: usize) -> usize {
        if self.swap {
            (col + 1) * self.height - row - 1
        } else {
            row * self.width + col
        }
    }

    #[inline]
    fn reflect(&self, index: usize) -> usize {
        if self.mirror {
            self.size - 1 - index
        } else {
            index
        }
    }

    #[inline]
    fn dest(&self, row: usize, col: usize) -> usize {
        self.reflect(self.slot(row, col))
    }
}

/// Centred chroma pair at `index`, or `(0, 0)` when either plane is short.
#[inline]
fn chroma(planes: &Planes, index: usize) -> (i32, i32) {
    match (planes.u.get(index), planes.v.get(index)) {
        (Some(&u), Some(&v)) => (u as i32 - 128, v as i32 - 128),
        _ => (0, 0),
    }
}

fn convert_420(planes: &Planes, geo: &Placement, out: &mut [u32]) {
    let width = geo.width;
    let uv_width = width / 2;
    let uv_height = geo.height / 2;
    let luma = planes.y.as_slice();

    for row in 0..uv_height {
        for col in 0..uv_width {
            let (u, v) = chroma(planes, row * uv_width + col);

            let p1 = row * 2 * width + col * 2;
            let p3 = p1 + width;
            // A truncated luma plane blanks the whole 2x2 block.
            let ys = if p3 + 1 < luma.len() {
                [luma[p1], luma[p1 + 1], luma[p3], luma[p3 + 1]]
            } else {
                [0; 4]
            };

            let (r, c) = (row * 2, col * 2);
            let blocks = [(r, c), (r, c + 1), (r + 1, c), (r + 1, c + 1)];
            for (&y, (sr, sc)) in ys.iter().zip(blocks) {
                out[geo.dest(sr, sc)] = yuv_to_argb(y as i32, u, v);
            }
        }
    }
}

fn convert_422(planes: &Planes, geo: &Placement, out: &mut [u32]) {
    let width = geo.width;
    let uv_width = width / 2;
    let luma = planes.y.as_slice();

    for row in 0..geo.height {
        for col in 0..uv_width {
            let (u, v) = chroma(planes, row * uv_width + col);

            let p1 = row * width + col * 2;
            let (y1, y2) = match (luma.get(p1), luma.get(p1 + 1)) {
                (Some(&a), Some(&b)) => (a, b),
                _ => (0, 0),
            };

            out[geo.dest(row, col * 2)] = yuv_to_argb(y1 as i32, u, v);
            out[geo.dest(row, col * 2 + 1)] = yuv_to_argb(y2 as i32, u, v);
        }
    }
}
