//! Reusable storage for the most recent planar frame.
//!
//! A [`FrameStore`] keeps one Y, one U and one V buffer alive across frames and
//! overwrites them in place whenever the incoming plane sizes match, so a
//! steady stream of same-sized frames allocates nothing after the first.

use crate::config::{FrameConfig, StrideMode};
use crate::error::{FrameError, Result};
use crate::frame::{PlanarFrame, PlanarSource, PlaneKind, Planes, SourceFrame};
use crate::geometry::{square_crop, CropPlan, CropRect};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Processing applied to a frame while it is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    /// Copy the planes unmodified.
    #[default]
    None,
    /// Centre-crop to a square. Falls back to [`None`](Self::None) when the
    /// amount to crop is not a multiple of 4.
    CropToSquare,
}

impl ProcessingMode {
    pub const FLAG_NONE: u32 = 0x00;
    pub const FLAG_CROP_TO_SQUARE: u32 = 0x01;

    /// Decode a legacy processing bit set. Unknown bits are ignored.
    pub fn from_flags(flags: u32) -> Self {
        if flags & Self::FLAG_CROP_TO_SQUARE != 0 {
            Self::CropToSquare
        } else {
            Self::None
        }
    }

    pub fn flags(self) -> u32 {
        match self {
            Self::None => Self::FLAG_NONE,
            Self::CropToSquare => Self::FLAG_CROP_TO_SQUARE,
        }
    }
}

/// Per-call ingest directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    pub processing: ProcessingMode,
    /// Capture time; `None` stamps the frame with `Instant::now()`.
    pub timestamp: Option<Instant>,
}

impl IngestOptions {
    pub fn new(processing: ProcessingMode) -> Self {
        Self {
            processing,
            timestamp: None,
        }
    }

    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// What a successful ingest did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    /// Processing actually applied (a misaligned crop reports `None`).
    pub applied: ProcessingMode,
    pub width: u32,
    pub height: u32,
    /// Whether any plane buffer had to be allocated.
    pub reallocated: bool,
}

/// Make `buf` exactly `len` bytes, keeping the existing allocation when it
/// already has that length. Returns `true` when a new buffer was allocated.
pub fn reuse_or_resize(buf: &mut Vec<u8>, len: usize) -> bool {
    if buf.len() == len {
        return false;
    }
    *buf = vec![0u8; len];
    true
}

struct StoreState {
    frame: PlanarFrame,
    /// Scratch row for row-wise crops, grown on demand and kept across frames.
    row: Vec<u8>,
}

/// Owner of the latest planar frame.
///
/// Every mutation and every read goes through one mutex, so a reader never
/// sees a frame mid-ingest and two ingests never interleave writes into the
/// same buffer.
pub struct FrameStore {
    state: Mutex<StoreState>,
    config: FrameConfig,
}

impl FrameStore {
    /// Create an empty store.
    pub fn new(config: FrameConfig) -> Self {
        Self {
            state: Mutex::new(StoreState {
                frame: PlanarFrame::empty(),
                row: Vec::new(),
            }),
            config,
        }
    }

    /// Create a store and ingest one frame into it.
    ///
    /// An ingest failure is logged and leaves the store without data; check
    /// [`has_data`](Self::has_data).
    pub fn from_source<S: PlanarSource + ?Sized>(
        source: &S,
        options: IngestOptions,
        config: FrameConfig,
    ) -> Self {
        let store = Self::new(config);
        // Failure already logged and the frame invalidated
        let _ = store.ingest(source, options);
        store
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Replace the stored frame with `source`, copying or cropping as requested.
    ///
    /// On error the frame is invalidated (all planes cleared) before returning,
    /// so the store never holds a partially written frame.
    pub fn ingest<S: PlanarSource + ?Sized>(
        &self,
        source: &S,
        options: IngestOptions,
    ) -> Result<IngestReport> {
        let mut state = self.state.lock();
        let result = source
            .to_planar()
            .and_then(|src| self.ingest_locked(&mut state, &src, options));

        if let Err(e) = &result {
            warn!(error = %e, "Frame ingest failed, invalidating frame");
            state.frame.dispose();
        }
        result
    }

    fn ingest_locked(
        &self,
        state: &mut StoreState,
        src: &SourceFrame<'_>,
        options: IngestOptions,
    ) -> Result<IngestReport> {
        let StoreState { frame, row } = state;

        if self.config.log_frames {
            debug!(
                width = src.width,
                height = src.height,
                y_stride = src.y.stride,
                u_stride = src.u.stride,
                v_stride = src.v.stride,
                rotation = src.rotation.degrees(),
                processing = ?options.processing,
                "Ingesting frame"
            );
        }

        frame.timestamp = options.timestamp.unwrap_or_else(Instant::now);
        frame.y_stride = src.y.stride;
        frame.u_stride = src.u.stride;
        frame.v_stride = src.v.stride;
        frame.rotation = src.rotation;
        frame.subsampling = src.subsampling;

        // Taken out so that any early return leaves the frame without planes.
        let mut planes = frame.take_planes().unwrap_or_default();

        let crop = match options.processing {
            ProcessingMode::CropToSquare => {
                let rect = square_crop(src.width, src.height);
                if rect.is_none() {
                    debug!(
                        width = src.width,
                        height = src.height,
                        "Crop amount not a multiple of 4, copying full frame"
                    );
                }
                rect
            }
            ProcessingMode::None => None,
        };

        let (applied, width, height, reallocated) = match crop {
            Some(rect) => {
                let reallocated = self.crop_planes(&mut planes, src, rect, row)?;
                (ProcessingMode::CropToSquare, rect.width, rect.height, reallocated)
            }
            None => {
                let reallocated = self.copy_planes(&mut planes, src, row)?;
                (ProcessingMode::None, src.width, src.height, reallocated)
            }
        };

        if reallocated {
            trace!(
                y = planes.y.len(),
                u = planes.u.len(),
                v = planes.v.len(),
                bytes = planes.memory_size(),
                "Allocated plane buffers"
            );
        }

        frame.width = width;
        frame.height = height;
        frame.set_planes(planes);

        Ok(IngestReport {
            applied,
            width,
            height,
            reallocated,
        })
    }

    fn copy_planes(
        &self,
        planes: &mut Planes,
        src: &SourceFrame<'_>,
        row: &mut Vec<u8>,
    ) -> Result<bool> {
        match self.config.stride_mode {
            StrideMode::Packed => {
                let mut reallocated = false;
                for kind in PlaneKind::ALL {
                    let data = src.plane(kind).data;
                    let dst = planes.get_mut(kind);
                    reallocated |= reuse_or_resize(dst, data.len());
                    dst.copy_from_slice(data);
                }
                Ok(reallocated)
            }
            // Compacting padded rows is a full-frame "crop".
            StrideMode::Honor => {
                self.crop_planes(planes, src, CropRect::full(src.width, src.height), row)
            }
        }
    }

    fn crop_planes(
        &self,
        planes: &mut Planes,
        src: &SourceFrame<'_>,
        rect: CropRect,
        row: &mut Vec<u8>,
    ) -> Result<bool> {
        let subsampling = src.crop_subsampling();
        let (chroma_width, _) = subsampling.chroma_size(src.width, src.height);

        if row.len() < rect.width as usize {
            row.resize(rect.width as usize, 0);
        }

        let mut reallocated = false;
        for kind in PlaneKind::ALL {
            let (plane_rect, row_width) = if kind.is_chroma() {
                (rect.subsampled(subsampling), chroma_width)
            } else {
                (rect, src.width)
            };
            let plane = src.plane(kind);
            let pitch = self.pitch(kind, plane.stride, row_width as usize)?;
            let plan = CropPlan::new(plane_rect, pitch);

            let dst = planes.get_mut(kind);
            reallocated |= reuse_or_resize(dst, plan.output_len());
            plan.copy_into(dst, plane.data, Some(row.as_mut_slice()), kind)?;
        }
        Ok(reallocated)
    }

    /// Distance between rows of a source plane.
    fn pitch(&self, plane: PlaneKind, stride: usize, row_width: usize) -> Result<usize> {
        match self.config.stride_mode {
            StrideMode::Packed => Ok(row_width),
            StrideMode::Honor if stride >= row_width => Ok(stride),
            StrideMode::Honor => Err(FrameError::StrideTooSmall {
                plane,
                stride,
                row_width,
            }),
        }
    }

    /// Whether all three planes are present.
    pub fn has_data(&self) -> bool {
        self.state.lock().frame.has_data()
    }

    /// Drop the stored planes.
    pub fn dispose(&self) {
        self.state.lock().frame.dispose();
    }

    /// Run `f` against the stored frame while holding the lock.
    pub fn with_frame<R>(&self, f: impl FnOnce(&PlanarFrame) -> R) -> R {
        f(&self.state.lock().frame)
    }

    /// An owned copy of the stored frame.
    pub fn snapshot(&self) -> PlanarFrame {
        self.state.lock().frame.clone()
    }

    /// Stored luma dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        let state = self.state.lock();
        (state.frame.width, state.frame.height)
    }
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new(FrameConfig::default())
    }
}
