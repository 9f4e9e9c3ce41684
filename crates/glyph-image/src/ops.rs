/// Convert a floating point intensity to 8 bits by clamping into `[0, 255]` and truncating.
///
/// This mirrors a plain numeric cast: the fractional part is dropped, never rounded.
///
/// ```
/// use glyph_image::ops::saturate_u8;
///
/// assert_eq!(saturate_u8(127.9), 127);
/// assert_eq!(saturate_u8(-12.0), 0);
/// ```
#[inline]
pub fn saturate_u8(x: f32) -> u8 {
    if x.is_nan() {
        return 0;
    }
    x.clamp(0.0, 255.0) as u8
}
