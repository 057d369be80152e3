//! Fixed-coefficient YUV → ARGB conversion for a single sample.
//!
//! Full-swing BT.601-style coefficients, evaluated in single precision and
//! truncated toward zero before clamping. Output must stay bit-exact, so the
//! arithmetic order here is load-bearing.

/// Red contribution of V.
pub const CR_R: f32 = 1.402;
/// Green contribution of U (subtracted).
pub const CB_G: f32 = 0.344;
/// Green contribution of V (subtracted).
pub const CR_G: f32 = 0.714;
/// Blue contribution of U.
pub const CB_B: f32 = 1.772;

/// Opaque alpha in a packed ARGB pixel.
pub const ALPHA_OPAQUE: u32 = 0xFF00_0000;

/// Convert luma and centred chroma (`u`, `v` already offset by −128).
#[inline]
pub fn yuv_to_argb(y: i32, u: i32, v: i32) -> u32 {
    let r = y + (CR_R * v as f32) as i32;
    let g = y - (CB_G * u as f32 + CR_G * v as f32) as i32;
    let b = y + (CB_B * u as f32) as i32;
    pack_argb(clamp(r), clamp(g), clamp(b))
}

/// Convert raw 8-bit samples.
#[inline]
pub fn sample_to_argb(y: u8, u: u8, v: u8) -> u32 {
    yuv_to_argb(y as i32, u as i32 - 128, v as i32 - 128)
}

#[inline]
fn clamp(c: i32) -> u8 {
    c.clamp(0, 255) as u8
}

/// Pack components as `0xFFRRGGBB`.
#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8) -> u32 {
    ALPHA_OPAQUE | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Split a packed pixel into `[a, r, g, b]`.
#[inline]
pub fn unpack_argb(pixel: u32) -> [u8; 4] {
    pixel.to_be_bytes()
}
