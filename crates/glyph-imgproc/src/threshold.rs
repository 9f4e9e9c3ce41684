use num_traits::Zero;
use std::cmp::PartialOrd;

use glyph_image::{Image, ImageError, ImageSize};

use crate::{
    filter::{correlate_2d, kernels::Kernel},
    padding::{self, Padding2D, PaddingMode},
    parallel,
};

/// Offset subtracted from the local mean when the parameters are derived from the image.
pub const AUTO_THRESHOLD_OFFSET: f32 = 7.0;

/// Apply a binary threshold to an image.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image of an arbitrary number of channels and type.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The maximum value to use when the input value is greater than the threshold.
///
/// # Examples
///
/// ```
/// use glyph_image::{Image, ImageSize};
/// use glyph_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(())
}

/// Block size derived from the image size: a quarter of its shorter side, made odd and at least 3.
pub fn auto_block_size(size: ImageSize) -> usize {
    let block_size = (size.width.min(size.height) as f32 * 0.25).round() as usize;
    let block_size = if block_size % 2 == 0 {
        block_size + 1
    } else {
        block_size
    };
    block_size.max(3)
}

/// Binarize an image against the weighted mean of its neighbourhood.
///
/// Each window of side `2 * (block_size / 2) + 1` is weighted by a tent kernel over the
/// image mirrored at its borders. A pixel becomes 255 when it is strictly greater than
/// `mean - c` and 0 otherwise.
///
/// # Arguments
///
/// * `src` - The input grayscale image.
/// * `dst` - The output binary image.
/// * `block_size` - The side of the neighbourhood.
/// * `c` - The offset subtracted from the local mean.
/// * `auto_params` - Derive `block_size` with [`auto_block_size`] and use
///   [`AUTO_THRESHOLD_OFFSET`] for `c`, ignoring the given values.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::threshold::adaptive_threshold;
///
/// let image = Image::<u8, 1>::from_rows(&[
///     vec![10, 10, 10],
///     vec![10, 200, 10],
///     vec![10, 10, 10],
/// ]).unwrap();
///
/// let mut binary = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
/// adaptive_threshold(&image, &mut binary, 3, 0.0, false).unwrap();
///
/// assert_eq!(binary.as_slice()[4], 255);
/// assert_eq!(binary.as_slice()[0], 0);
/// ```
pub fn adaptive_threshold(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    block_size: usize,
    c: f32,
    auto_params: bool,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let (block_size, c) = if auto_params {
        (auto_block_size(src.size()), AUTO_THRESHOLD_OFFSET)
    } else {
        (block_size, c)
    };

    if src.is_empty() {
        return Ok(());
    }

    let pad = block_size / 2;
    let kernel = Kernel::tent(pad + 1)?;
    let norm = kernel.sum();

    log::debug!(
        "adaptive_threshold: block_size={block_size}, c={c}, kernel sum {norm}"
    );

    let padded = padding::pad_image(src, Padding2D::uniform(pad), PaddingMode::Reflect101, [0])?
        .cast::<f32>()?;

    let mut weighted = Image::from_size_val(src.size(), 0f32)?;
    correlate_2d(&padded, &kernel, &mut weighted)?;

    parallel::par_iter_rows_val_two(src, &weighted, dst, |&pixel, &sum, out| {
        *out = if pixel as f32 > sum / norm - c { 255 } else { 0 };
    });

    Ok(())
}
