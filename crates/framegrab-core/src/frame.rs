//! Planar YUV frame types.
//!
//! [`SourceFrame`] borrows the planes handed over by a video source for the
//! duration of an ingest call. [`PlanarFrame`] is the owned, reusable copy
//! kept by a [`FrameStore`](crate::FrameStore).

use crate::error::Result;
use crate::rotation::Rotation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Identifies one of the three planes of a planar YUV frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneKind {
    /// Luma, full resolution
    Y,
    /// Blue-difference chroma
    U,
    /// Red-difference chroma
    V,
}

impl PlaneKind {
    pub const ALL: [PlaneKind; 3] = [PlaneKind::Y, PlaneKind::U, PlaneKind::V];

    #[inline]
    pub fn is_chroma(self) -> bool {
        !matches!(self, Self::Y)
    }
}

impl fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Y => "Y",
            Self::U => "U",
            Self::V => "V",
        })
    }
}

/// Chroma subsampling layout of an 8-bit planar frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromaSubsampling {
    /// Chroma halved horizontally and vertically (I420)
    #[serde(rename = "420")]
    Yuv420,
    /// Chroma halved horizontally only (I422)
    #[serde(rename = "422")]
    Yuv422,
}

impl ChromaSubsampling {
    /// Guess the layout from plane lengths when the source gives no tag.
    ///
    /// A luma/chroma length ratio above 2 (integer division) means 4:2:0.
    /// Non-standard plane sizes can fool this, so prefer an explicit tag.
    pub fn detect(luma_len: usize, chroma_len: usize) -> Self {
        if chroma_len == 0 || luma_len / chroma_len > 2 {
            Self::Yuv420
        } else {
            Self::Yuv422
        }
    }

    /// Dimensions of a chroma plane for a `width × height` luma plane.
    #[inline]
    pub fn chroma_size(self, width: u32, height: u32) -> (u32, u32) {
        match self {
            Self::Yuv420 => (width / 2, height / 2),
            Self::Yuv422 => (width / 2, height),
        }
    }
}

/// A borrowed plane of source pixel data.
#[derive(Debug, Clone, Copy)]
pub struct SourcePlane<'a> {
    pub data: &'a [u8],
    /// Bytes per row as reported by the source (may include padding)
    pub stride: usize,
}

impl<'a> SourcePlane<'a> {
    #[inline]
    pub fn new(data: &'a [u8], stride: usize) -> Self {
        Self { data, stride }
    }
}

/// A planar frame as handed over by a video source.
///
/// Nothing here outlives the ingest call; the source is free to release the
/// backing memory as soon as [`FrameStore::ingest`](crate::FrameStore::ingest)
/// returns.
#[derive(Debug, Clone, Copy)]
pub struct SourceFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub y: SourcePlane<'a>,
    pub u: SourcePlane<'a>,
    pub v: SourcePlane<'a>,
    pub rotation: Rotation,
    /// Explicit layout, when the source knows it
    pub subsampling: Option<ChromaSubsampling>,
}

impl<'a> SourceFrame<'a> {
    /// Describe tightly packed planes (stride == row width).
    pub fn packed(width: u32, height: u32, y: &'a [u8], u: &'a [u8], v: &'a [u8]) -> Self {
        let chroma_stride = (width / 2) as usize;
        Self {
            width,
            height,
            y: SourcePlane::new(y, width as usize),
            u: SourcePlane::new(u, chroma_stride),
            v: SourcePlane::new(v, chroma_stride),
            rotation: Rotation::DEG_0,
            subsampling: None,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_subsampling(mut self, subsampling: ChromaSubsampling) -> Self {
        self.subsampling = Some(subsampling);
        self
    }

    pub fn with_strides(mut self, y_stride: usize, u_stride: usize, v_stride: usize) -> Self {
        self.y.stride = y_stride;
        self.u.stride = u_stride;
        self.v.stride = v_stride;
        self
    }

    #[inline]
    pub fn plane(&self, kind: PlaneKind) -> &SourcePlane<'a> {
        match kind {
            PlaneKind::Y => &self.y,
            PlaneKind::U => &self.u,
            PlaneKind::V => &self.v,
        }
    }

    /// Layout used to cut chroma windows on ingest.
    ///
    /// Only an explicit tag selects 4:2:2; an untagged source is cropped at
    /// half width and half height whatever its plane lengths suggest, since
    /// padded rows make the length ratio unreliable here.
    pub fn crop_subsampling(&self) -> ChromaSubsampling {
        self.subsampling.unwrap_or(ChromaSubsampling::Yuv420)
    }
}

/// Anything that can expose its pixels as three 8-bit planes.
///
/// Implemented by video-source adapters; `to_planar` fails when the native
/// representation cannot be mapped (e.g. a GPU texture with no CPU copy).
pub trait PlanarSource {
    fn to_planar(&self) -> Result<SourceFrame<'_>>;
}

impl PlanarSource for SourceFrame<'_> {
    fn to_planar(&self) -> Result<SourceFrame<'_>> {
        Ok(*self)
    }
}

/// The three owned planes of a valid frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Planes {
    pub y: Vec<u8>,
    pub u: Vec<u8>,
    pub v: Vec<u8>,
}

impl Planes {
    #[inline]
    pub fn get(&self, kind: PlaneKind) -> &[u8] {
        match kind {
            PlaneKind::Y => &self.y,
            PlaneKind::U => &self.u,
            PlaneKind::V => &self.v,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, kind: PlaneKind) -> &mut Vec<u8> {
        match kind {
            PlaneKind::Y => &mut self.y,
            PlaneKind::U => &mut self.u,
            PlaneKind::V => &mut self.v,
        }
    }

    /// Total memory held by the planes in bytes.
    pub fn memory_size(&self) -> usize {
        self.y.len() + self.u.len() + self.v.len()
    }
}

/// An owned planar frame with its capture metadata.
///
/// Either all three planes are present or none is; a frame without planes is
/// "invalid" and converts to nothing.
#[derive(Debug, Clone)]
pub struct PlanarFrame {
    pub width: u32,
    pub height: u32,
    pub y_stride: usize,
    pub u_stride: usize,
    pub v_stride: usize,
    pub rotation: Rotation,
    pub subsampling: Option<ChromaSubsampling>,
    pub timestamp: Instant,
    planes: Option<Planes>,
}

impl PlanarFrame {
    /// A frame with no data.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            y_stride: 0,
            u_stride: 0,
            v_stride: 0,
            rotation: Rotation::DEG_0,
            subsampling: None,
            timestamp: Instant::now(),
            planes: None,
        }
    }

    /// Build a valid frame from tightly packed planes.
    pub fn from_planes(width: u32, height: u32, planes: Planes, rotation: Rotation) -> Self {
        let chroma_stride = (width / 2) as usize;
        Self {
            width,
            height,
            y_stride: width as usize,
            u_stride: chroma_stride,
            v_stride: chroma_stride,
            rotation,
            subsampling: None,
            timestamp: Instant::now(),
            planes: Some(planes),
        }
    }

    #[inline]
    pub fn has_data(&self) -> bool {
        self.planes.is_some()
    }

    #[inline]
    pub fn planes(&self) -> Option<&Planes> {
        self.planes.as_ref()
    }

    pub fn y_plane(&self) -> Option<&[u8]> {
        self.planes.as_ref().map(|p| p.y.as_slice())
    }

    pub fn u_plane(&self) -> Option<&[u8]> {
        self.planes.as_ref().map(|p| p.u.as_slice())
    }

    pub fn v_plane(&self) -> Option<&[u8]> {
        self.planes.as_ref().map(|p| p.v.as_slice())
    }

    /// Drop all three planes.
    pub fn dispose(&mut self) {
        self.planes = None;
    }

    /// Layout of the stored planes: the explicit tag, else the length heuristic.
    pub fn effective_subsampling(&self) -> Option<ChromaSubsampling> {
        let planes = self.planes.as_ref()?;
        Some(
            self.subsampling
                .unwrap_or_else(|| ChromaSubsampling::detect(planes.y.len(), planes.u.len())),
        )
    }

    pub(crate) fn take_planes(&mut self) -> Option<Planes> {
        self.planes.take()
    }

    pub(crate) fn set_planes(&mut self, planes: Planes) {
        self.planes = Some(planes);
    }
}

impl Default for PlanarFrame {
    fn default() -> Self {
        Self::empty()
    }
}
