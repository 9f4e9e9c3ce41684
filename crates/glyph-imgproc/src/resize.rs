use glyph_image::{Image, ImageError, ImageSize};

use crate::{padding, parallel};

/// Resize an image to the size of `dst`.
///
/// Smaller axes are first upscaled by nearest-neighbour replication with the integer factor
/// `ceil(target / current)`. The result is then downscaled by averaging the
/// `floor(current / target)` blocks of its top-left region, truncating the mean back to 8 bits.
///
/// An empty source yields a zero-filled destination.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image. Its size is the target size.
///
/// # Example
///
/// ```
/// use glyph_image::{Image, ImageSize};
/// use glyph_imgproc::resize::resize;
///
/// let image = Image::<u8, 1>::from_rows(&[
///     vec![0, 2, 10, 10],
///     vec![4, 6, 10, 10],
/// ]).unwrap();
///
/// let mut resized = Image::<u8, 1>::from_size_val(ImageSize { width: 2, height: 1 }, 0).unwrap();
/// resize(&image, &mut resized).unwrap();
///
/// assert_eq!(resized.as_slice(), &[3, 10]);
/// ```
pub fn resize<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
) -> Result<(), ImageError> {
    let target = dst.size();

    if src.size() == target {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    if target.is_empty() {
        return Ok(());
    }

    let upscaled;
    let src = if !src.is_empty() && (src.rows() < target.height || src.cols() < target.width) {
        upscaled = upscale_nearest(
            src,
            target.height.div_ceil(src.rows()),
            target.width.div_ceil(src.cols()),
        )?;
        &upscaled
    } else {
        src
    };

    let factor_h = src.rows() / target.height;
    let factor_w = src.cols() / target.width;

    if factor_h == 0 || factor_w == 0 {
        log::debug!(
            "resize: degenerate {} -> {}, copying the overlapping region",
            src.size(),
            target
        );
        copy_overlap(src, dst);
        return Ok(());
    }

    downscale_mean(src, dst, factor_h, factor_w);

    Ok(())
}

/// Allocate and return a copy of `src` resized to `size`.
///
/// See [`resize`].
pub fn resize_to<const C: usize>(
    src: &Image<u8, C>,
    size: ImageSize,
) -> Result<Image<u8, C>, ImageError> {
    let mut dst = Image::from_size_val(size, 0u8)?;
    resize(src, &mut dst)?;
    Ok(dst)
}

/// Replicate every pixel `factor_h` times vertically and `factor_w` times horizontally.
pub fn upscale_nearest<T, const C: usize>(
    src: &Image<T, C>,
    factor_h: usize,
    factor_w: usize,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    if factor_h == 0 || factor_w == 0 {
        return Err(ImageError::InvalidKernelSize(factor_h.min(factor_w)));
    }

    let mut dst = Image::from_size_val(
        ImageSize {
            width: src.cols() * factor_w,
            height: src.rows() * factor_h,
        },
        T::default(),
    )?;

    let src_cols = src.cols();
    let src_data = src.as_slice();

    parallel::par_fill_rows(&mut dst, |y, dst_row| {
        let src_row = &src_data[(y / factor_h) * src_cols * C..][..src_cols * C];
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let sx = (x / factor_w) * C;
            dst_pixel.copy_from_slice(&src_row[sx..sx + C]);
        }
    });

    Ok(dst)
}

fn downscale_mean<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    factor_h: usize,
    factor_w: usize,
) {
    let src_stride = src.cols() * C;
    let src_data = src.as_slice();
    let block_area = (factor_h * factor_w) as u32;

    parallel::par_fill_rows(dst, |ty, dst_row| {
        for (tx, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            for (ch, out) in dst_pixel.iter_mut().enumerate() {
                let mut sum = 0u32;
                for i in 0..factor_h {
                    let row = (ty * factor_h + i) * src_stride;
                    for j in 0..factor_w {
                        sum += src_data[row + (tx * factor_w + j) * C + ch] as u32;
                    }
                }
                *out = (sum / block_area) as u8;
            }
        }
    });
}

fn copy_overlap<const C: usize>(src: &Image<u8, C>, dst: &mut Image<u8, C>) {
    let rows = src.rows().min(dst.rows());
    let cols = src.cols().min(dst.cols());
    let src_stride = src.cols() * C;
    let src_data = src.as_slice();

    parallel::par_fill_rows(dst, |y, dst_row| {
        dst_row.fill(0);
        if y < rows {
            dst_row[..cols * C].copy_from_slice(&src_data[y * src_stride..][..cols * C]);
        }
    });
}

/// Resize an image into the inner area of `target` and pad it back to `target`.
///
/// The inner area is `target - 2 * padding` on each axis. The border is filled with
/// `pad_value`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidPadding`] if the padding leaves no inner area.
///
/// # Example
///
/// ```
/// use glyph_image::{Image, ImageSize};
/// use glyph_imgproc::resize::prepare_standard_geometry;
///
/// let image = Image::<u8, 1>::from_size_val(ImageSize { width: 50, height: 17 }, 200).unwrap();
/// let standard = prepare_standard_geometry(&image, ImageSize { width: 28, height: 28 }, 2, 0).unwrap();
///
/// assert_eq!(standard.size(), ImageSize { width: 28, height: 28 });
/// assert_eq!(standard.as_slice()[0], 0);
/// assert_eq!(standard.as_slice()[2 * 28 + 2], 200);
/// ```
pub fn prepare_standard_geometry<const C: usize>(
    src: &Image<u8, C>,
    target: ImageSize,
    padding: usize,
    pad_value: u8,
) -> Result<Image<u8, C>, ImageError> {
    if target.width <= 2 * padding || target.height <= 2 * padding {
        return Err(ImageError::InvalidPadding {
            padding,
            width: target.width,
            height: target.height,
        });
    }

    let inner = ImageSize {
        width: target.width - 2 * padding,
        height: target.height - 2 * padding,
    };

    let resized = resize_to(src, inner)?;

    padding::pad(&resized, padding, pad_value)
}
