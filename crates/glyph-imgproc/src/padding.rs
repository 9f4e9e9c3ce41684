use glyph_image::{Image, ImageError, ImageSize};

use crate::parallel;

/// A border type for the spatial padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingMode {
    /// Fill the border with a single, constant value.
    ///
    /// Example: ...d c b a | 0 0 0 0...
    Constant,

    /// Mirror the values at the boundary, starting with the pixel next to the edge.
    ///
    /// Example: ...d c b a | b c d e...
    Reflect101,
}

impl PaddingMode {
    fn reflect101(mut i: isize, len: isize) -> isize {
        if len == 1 {
            return 0;
        }
        while i < 0 || i >= len {
            i = if i < 0 { -i } else { 2 * len - i - 2 };
        }
        i
    }

    /// Map a possibly out-of-range coordinate to a valid index in `[0, len)`.
    ///
    /// Returns `None` when the coordinate must take the constant fill, i.e. for
    /// [`PaddingMode::Constant`] outside the range or when `len` is zero.
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = len as isize;
        if (0..n).contains(&i) {
            return Some(i as usize);
        }
        match self {
            PaddingMode::Constant => None,
            PaddingMode::Reflect101 => Some(Self::reflect101(i, n) as usize),
        }
    }
}

/// Represents 2D padding with top, bottom, left, and right values (in pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding2D {
    /// Amount of padding to add on the top side.
    pub top: usize,
    /// Amount of padding to add on the bottom side.
    pub bottom: usize,
    /// Amount of padding to add on the left side.
    pub left: usize,
    /// Amount of padding to add on the right side.
    pub right: usize,
}

impl Padding2D {
    /// The same amount of padding on every side.
    pub fn uniform(padding: usize) -> Self {
        Self {
            top: padding,
            bottom: padding,
            left: padding,
            right: padding,
        }
    }

    /// Padding to center a `k x k` window on every pixel.
    ///
    /// Odd sizes pad `k / 2` on each side; even sizes pad one pixel less before than after.
    pub fn for_window(k: usize) -> Self {
        let before = k.saturating_sub(1) / 2;
        let after = k / 2;
        Self {
            top: before,
            bottom: after,
            left: before,
            right: after,
        }
    }

    /// The size of an image of `size` once padded.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Pad an image into `dst`, centering the source and filling the border by `padding_mode`.
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image with size `padding.padded_size(src.size())`.
/// * `padding` - The amount of padding for each side.
/// * `padding_mode` - The border handling.
/// * `constant_value` - The per-channel fill for [`PaddingMode::Constant`], also used
///   for every border pixel when the source is empty.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match the padded size of `src`.
///
/// # Example
///
/// ```rust
/// use glyph_image::{Image, ImageSize};
/// use glyph_imgproc::padding::{spatial_padding, Padding2D, PaddingMode};
///
/// let src = Image::<u8, 1>::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 4, height: 4 }, 0).unwrap();
///
/// spatial_padding(&src, &mut dst, Padding2D::uniform(1), PaddingMode::Reflect101, [0]).unwrap();
///
/// assert_eq!(&dst.as_slice()[0..4], &[4, 3, 4, 3]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
    padding_mode: PaddingMode,
    constant_value: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let expected = padding.padded_size(src.size());
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    let (src_cols, src_rows) = (src.cols(), src.rows());
    let src_data = src.as_slice();

    parallel::par_fill_rows(dst, |y, dst_row| {
        let sy = padding_mode.map_index(y as isize - padding.top as isize, src_rows);
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let sx = padding_mode.map_index(x as isize - padding.left as isize, src_cols);
            match (sy, sx) {
                (Some(sy), Some(sx)) => {
                    let offset = (sy * src_cols + sx) * C;
                    dst_pixel.copy_from_slice(&src_data[offset..offset + C]);
                }
                _ => dst_pixel.copy_from_slice(&constant_value),
            }
        }
    });

    Ok(())
}

/// Allocate and return a padded copy of `src`.
///
/// See [`spatial_padding`] for the meaning of the arguments.
pub fn pad_image<T, const C: usize>(
    src: &Image<T, C>,
    padding: Padding2D,
    padding_mode: PaddingMode,
    constant_value: [T; C],
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = Image::from_size_val(padding.padded_size(src.size()), constant_value[0])?;
    spatial_padding(src, &mut dst, padding, padding_mode, constant_value)?;
    Ok(dst)
}

/// Symmetric constant padding by `padding` pixels on every side.
///
/// # Example
///
/// ```rust
/// use glyph_image::Image;
/// use glyph_imgproc::padding::pad;
///
/// let src = Image::<u8, 1>::from_rows(&[vec![7]]).unwrap();
/// let padded = pad(&src, 1, 0).unwrap();
///
/// assert_eq!(padded.as_slice(), &[0, 0, 0, 0, 7, 0, 0, 0, 0]);
/// ```
pub fn pad<T, const C: usize>(
    src: &Image<T, C>,
    padding: usize,
    pad_value: T,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    pad_image(
        src,
        Padding2D::uniform(padding),
        PaddingMode::Constant,
        [pad_value; C],
    )
}
