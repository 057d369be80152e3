//! Frame rotation as reported by the video source.

use crate::error::{FrameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clockwise rotation, in degrees, that must be applied to display a frame upright.
///
/// The raw degree value is kept verbatim, so `-90` and `270` stay distinguishable
/// even though they describe the same orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rotation(i32);

impl Rotation {
    pub const DEG_0: Self = Self(0);
    pub const DEG_90: Self = Self(90);
    pub const DEG_180: Self = Self(180);
    pub const DEG_270: Self = Self(270);

    /// Degree values accepted from a video source.
    pub const SUPPORTED: [i32; 6] = [0, 90, 180, 270, -90, -180];

    /// Validate a degree value.
    pub fn new(degrees: i32) -> Result<Self> {
        if Self::SUPPORTED.contains(&degrees) {
            Ok(Self(degrees))
        } else {
            Err(FrameError::UnsupportedRotation(degrees))
        }
    }

    /// The degree value exactly as supplied.
    #[inline]
    pub fn degrees(self) -> i32 {
        self.0
    }

    /// Rotation folded into `0..360`.
    #[inline]
    pub fn normalized(self) -> u32 {
        self.0.rem_euclid(360) as u32
    }

    /// Whether the output is transposed (90° family), swapping width and height.
    #[inline]
    pub fn needs_swap(self) -> bool {
        self.0 % 180 != 0
    }

    /// Whether destination indices are reflected through the pixel count.
    #[inline]
    pub fn needs_mirror(self) -> bool {
        matches!(self.0, -90 | 270 | 180 | -180)
    }

    /// Output dimensions for a source of `width × height`.
    #[inline]
    pub fn output_size(self, width: u32, height: u32) -> (u32, u32) {
        if self.needs_swap() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = FrameError;

    fn try_from(degrees: i32) -> Result<Self> {
        Self::new(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}
