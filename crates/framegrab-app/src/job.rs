//! Snapshot job description and the raw planar file it points at.

use anyhow::{Context, Result};
use framegrab_core::{
    ChromaSubsampling, FrameConfig, FrameError, PlanarSource, PlaneKind, ProcessingMode, Rotation,
    SourceFrame, SourcePlane,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One conversion: which raw file to read, how it is laid out, and where
/// the resulting image goes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub processing: ProcessingMode,
    /// Defaults to 4:2:0 when absent.
    #[serde(default)]
    pub subsampling: Option<ChromaSubsampling>,
    /// Y, U, V row strides; tightly packed when absent.
    #[serde(default)]
    pub strides: Option<[usize; 3]>,
    #[serde(default)]
    pub frame: FrameConfig,
}

impl SnapshotJob {
    /// Load a job from a JSON file. Relative input/output paths resolve
    /// against the job file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading job file {}", path.display()))?;
        let mut job: SnapshotJob = serde_json::from_str(&text)
            .with_context(|| format!("parsing job file {}", path.display()))?;

        if let Some(dir) = path.parent() {
            job.input = dir.join(&job.input);
            job.output = dir.join(&job.output);
        }
        Ok(job)
    }

    pub fn layout(&self) -> ChromaSubsampling {
        self.subsampling.unwrap_or(ChromaSubsampling::Yuv420)
    }

    fn strides(&self) -> [usize; 3] {
        self.strides.unwrap_or_else(|| {
            let (chroma_width, _) = self.layout().chroma_size(self.width, self.height);
            [self.width as usize, chroma_width as usize, chroma_width as usize]
        })
    }
}

/// A raw planar file held in memory: Y, then U, then V, each `stride * rows`.
pub struct RawPlanarFile<'a> {
    job: &'a SnapshotJob,
    bytes: Vec<u8>,
}

impl<'a> RawPlanarFile<'a> {
    pub fn read(job: &'a SnapshotJob) -> Result<Self> {
        let bytes = std::fs::read(&job.input)
            .with_context(|| format!("reading raw frame {}", job.input.display()))?;
        Ok(Self::from_bytes(job, bytes))
    }

    pub fn from_bytes(job: &'a SnapshotJob, bytes: Vec<u8>) -> Self {
        Self { job, bytes }
    }

    /// Byte length of each plane, in file order.
    fn plane_lengths(&self) -> [usize; 3] {
        let (_, chroma_rows) = self.job.layout().chroma_size(self.job.width, self.job.height);
        let [y, u, v] = self.job.strides();
        [
            y * self.job.height as usize,
            u * chroma_rows as usize,
            v * chroma_rows as usize,
        ]
    }
}

impl PlanarSource for RawPlanarFile<'_> {
    fn to_planar(&self) -> framegrab_core::Result<SourceFrame<'_>> {
        let lengths = self.plane_lengths();
        let strides = self.job.strides();

        let mut planes = [SourcePlane::new(&[], 0); 3];
        let mut offset = 0;
        for (i, kind) in PlaneKind::ALL.into_iter().enumerate() {
            let end = offset + lengths[i];
            let data = self
                .bytes
                .get(offset..end)
                .ok_or(FrameError::PlaneTooShort {
                    plane: kind,
                    required: end,
                    actual: self.bytes.len(),
                })?;
            planes[i] = SourcePlane::new(data, strides[i]);
            offset = end;
        }

        let [y, u, v] = planes;
        Ok(SourceFrame {
            width: self.job.width,
            height: self.job.height,
            y,
            u,
            v,
            rotation: self.job.rotation,
            subsampling: Some(self.job.layout()),
        })
    }
}
