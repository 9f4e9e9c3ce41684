//! Morphological image processing operations.

use std::str::FromStr;

use glyph_image::{Image, ImageError};
use serde::{Deserialize, Serialize};

mod ops;
pub use ops::{close, dilate, erode, get_boundaries, open, sliding_window_reduce};

pub use crate::histogram::dominant_value;

/// The composite operation run by [`morphology_filter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphFilterMode {
    /// Erosion followed by dilation. Removes small bright specks.
    Open,
    /// Dilation followed by erosion. Fills small dark gaps.
    Close,
}

/// Error returned when parsing an unknown [`MorphFilterMode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown morphology filter mode '{0}', expected 'open' or 'close'")]
pub struct ParseMorphFilterModeError(pub String);

impl FromStr for MorphFilterMode {
    type Err = ParseMorphFilterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(MorphFilterMode::Open),
            "close" => Ok(MorphFilterMode::Close),
            _ => Err(ParseMorphFilterModeError(s.to_string())),
        }
    }
}

impl std::fmt::Display for MorphFilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MorphFilterMode::Open => write!(f, "open"),
            MorphFilterMode::Close => write!(f, "close"),
        }
    }
}

/// Run an opening or a closing with a square structuring element.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `kernel_size` - The side of the structuring element.
/// * `fill` - The erosion border value, the dominant value of `src` when `None`.
/// * `mode` - The composite operation.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::morphology::{morphology_filter, MorphFilterMode};
///
/// let image = Image::<u8, 1>::from_rows(&[
///     vec![0, 0, 0, 0, 0],
///     vec![0, 9, 9, 9, 0],
///     vec![0, 9, 0, 9, 0],
///     vec![0, 9, 9, 9, 0],
///     vec![0, 0, 0, 0, 0],
/// ]).unwrap();
///
/// let closed = morphology_filter(&image, 3, None, MorphFilterMode::Close).unwrap();
/// assert_eq!(closed.get_pixel(2, 2, 0).unwrap(), &9);
/// ```
pub fn morphology_filter(
    src: &Image<u8, 1>,
    kernel_size: usize,
    fill: Option<u8>,
    mode: MorphFilterMode,
) -> Result<Image<u8, 1>, ImageError> {
    match mode {
        MorphFilterMode::Open => open(src, kernel_size, fill),
        MorphFilterMode::Close => close(src, kernel_size, fill),
    }
}
