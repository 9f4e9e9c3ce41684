//! Geometric augmentations.
//!
//! Every function returns a new image of the same single-channel layout. Functions with
//! an optional `fill` resolve it to the dominant value of the source when `None`, so the
//! uncovered area blends with the background.

use glyph_image::{Image, ImageError};
use glyph_imgproc::{
    crop, flip,
    histogram::dominant_value,
    padding::{self, Padding2D, PaddingMode},
    warp,
};
use rand::Rng;

/// Largest absolute angle, in degrees, drawn by [`rotate_small_angle`].
pub const MAX_SMALL_ANGLE: i32 = 30;

/// Largest absolute offset, in pixels, drawn by [`random_shift`].
pub const MAX_SHIFT: i32 = 4;

/// Horizontal direction constraint of a random rotation or translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Clockwise rotation, rightward translation.
    Right,
    /// Counter-clockwise rotation, leftward translation.
    Left,
}

/// Mirror the columns of the image.
pub fn horizontal_flip(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    flip::horizontal_flip(src)
}

/// Mirror the rows of the image.
pub fn vertical_flip(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    flip::vertical_flip(src)
}

/// Quarter turn, clockwise when `is_right` is set.
pub fn rotate_90(src: &Image<u8, 1>, is_right: bool) -> Result<Image<u8, 1>, ImageError> {
    warp::rotate_90(src, is_right)
}

/// Draw a whole number of degrees for a small rotation.
///
/// `Right` draws from `[0, 30]`, `Left` from `[-30, 0]` and `None` from `[-30, 30]`.
pub fn sample_small_angle<R: Rng>(direction: Option<Direction>, rng: &mut R) -> i32 {
    let range = match direction {
        Some(Direction::Right) => 0..=MAX_SMALL_ANGLE,
        Some(Direction::Left) => -MAX_SMALL_ANGLE..=0,
        None => -MAX_SMALL_ANGLE..=MAX_SMALL_ANGLE,
    };
    rng.random_range(range)
}

/// Rotate the image about `(w / 2, h / 2)` by a small angle.
///
/// Positive angles turn the content clockwise, so [`Direction::Right`] only draws
/// clockwise turns.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `angle` - The angle in degrees, drawn with [`sample_small_angle`] when `None`.
/// * `direction` - The direction constraint of the drawn angle.
/// * `fill` - The value of the uncovered pixels.
/// * `rng` - The random source.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_augment::geometric::rotate_small_angle;
///
/// let image = Image::<u8, 1>::from_rows(&[vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]).unwrap();
/// let rotated = rotate_small_angle(&image, Some(0.0), None, Some(0), &mut rand::rng()).unwrap();
///
/// assert_eq!(rotated.as_slice(), &[1, 2, 0, 4, 5, 0, 0, 0, 0]);
/// ```
pub fn rotate_small_angle<R: Rng>(
    src: &Image<u8, 1>,
    angle: Option<f32>,
    direction: Option<Direction>,
    fill: Option<u8>,
    rng: &mut R,
) -> Result<Image<u8, 1>, ImageError> {
    let angle = match angle {
        Some(angle) => angle,
        None => sample_small_angle(direction, rng) as f32,
    };
    let fill = fill.unwrap_or_else(|| dominant_value(src));
    log::debug!("rotate_small_angle: angle={angle}, fill={fill}");
    warp::rotate_nearest(src, angle, fill)
}

/// Draw a translation `(dx, dy)`.
///
/// `dx` is drawn from `[1, 4]` for `Right`, `[-4, -1]` for `Left` and `[-4, 4]` for
/// `None`. `dy` is always drawn from `[-4, 4]`.
pub fn sample_shift<R: Rng>(direction: Option<Direction>, rng: &mut R) -> (i32, i32) {
    let dx_range = match direction {
        Some(Direction::Right) => 1..=MAX_SHIFT,
        Some(Direction::Left) => -MAX_SHIFT..=-1,
        None => -MAX_SHIFT..=MAX_SHIFT,
    };
    let dx = rng.random_range(dx_range);
    let dy = rng.random_range(-MAX_SHIFT..=MAX_SHIFT);
    (dx, dy)
}

/// Translate the image by a bounded random offset.
///
/// The source is padded by `(|dy|, |dx|)` with `fill` and a window of the source size is
/// cropped at a random position of the padded canvas.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `fill` - The value of the uncovered pixels.
/// * `direction` - The horizontal direction constraint of the sampled offset.
/// * `rng` - The random source.
pub fn random_shift<R: Rng>(
    src: &Image<u8, 1>,
    fill: Option<u8>,
    direction: Option<Direction>,
    rng: &mut R,
) -> Result<Image<u8, 1>, ImageError> {
    let (dx, dy) = sample_shift(direction, rng);
    let (pad_x, pad_y) = (dx.unsigned_abs() as usize, dy.unsigned_abs() as usize);
    let fill = fill.unwrap_or_else(|| dominant_value(src));

    let padded = padding::pad_image(
        src,
        Padding2D {
            top: pad_y,
            bottom: pad_y,
            left: pad_x,
            right: pad_x,
        },
        PaddingMode::Constant,
        [fill],
    )?;

    let sx = rng.random_range(0..=2 * pad_x);
    let sy = rng.random_range(0..=2 * pad_y);
    log::debug!("random_shift: dx={dx}, dy={dy}, window=({sx}, {sy}), fill={fill}");

    crop::crop(&padded, sx, sy, src.size())
}
