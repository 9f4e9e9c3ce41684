use glyph_image::{Image, ImageError, ImageSize};

use crate::{padding, parallel};

/// Size of the pooled grid for a window of `kernel_shape` (height, width) moved by `stride`.
///
/// Each axis holds `floor((n - k) / stride) + 1` windows, or none when the window does not fit.
pub fn pooled_size(size: ImageSize, kernel_shape: (usize, usize), stride: usize) -> ImageSize {
    let windows = |n: usize, k: usize| {
        if n < k || stride == 0 {
            0
        } else {
            (n - k) / stride + 1
        }
    };
    ImageSize {
        width: windows(size.width, kernel_shape.1),
        height: windows(size.height, kernel_shape.0),
    }
}

/// Max pooling over strided windows.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `kernel_shape` - The window (height, width).
/// * `stride` - The step between windows on both axes. Defaults to the window height.
/// * `pad_width` - Constant padding added on every side before pooling.
/// * `pad_value` - The padding value.
///
/// # Errors
///
/// Returns an error if the window or the stride is zero.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::pooling::max_pool;
///
/// let image = Image::<u8, 1>::from_rows(&[
///     vec![1, 2, 3, 4],
///     vec![5, 6, 7, 8],
///     vec![9, 10, 11, 12],
///     vec![13, 14, 15, 16],
/// ]).unwrap();
///
/// let pooled = max_pool(&image, (2, 2), Some(2), 0, 0).unwrap();
///
/// assert_eq!(pooled.as_slice(), &[6, 8, 14, 16]);
/// ```
pub fn max_pool(
    src: &Image<u8, 1>,
    kernel_shape: (usize, usize),
    stride: Option<usize>,
    pad_width: usize,
    pad_value: u8,
) -> Result<Image<u8, 1>, ImageError> {
    let (kh, kw) = kernel_shape;
    let stride = stride.unwrap_or(kh);
    if kh == 0 || kw == 0 {
        return Err(ImageError::InvalidKernelSize(0));
    }
    if stride == 0 {
        return Err(ImageError::InvalidKernelSize(stride));
    }

    let padded;
    let src = if pad_width > 0 {
        padded = padding::pad(src, pad_width, pad_value)?;
        &padded
    } else {
        src
    };

    let mut dst = Image::from_size_val(pooled_size(src.size(), kernel_shape, stride), 0u8)?;

    let src_cols = src.cols();
    let src_data = src.as_slice();

    parallel::par_fill_rows(&mut dst, |y, dst_row| {
        for (x, out) in dst_row.iter_mut().enumerate() {
            *out = (0..kh)
                .flat_map(|i| {
                    let offset = (y * stride + i) * src_cols + x * stride;
                    src_data[offset..offset + kw].iter().copied()
                })
                .max()
                .unwrap_or(0);
        }
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_pool_default_stride() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[
            vec![1, 9, 3, 4, 0],
            vec![5, 6, 7, 8, 0],
            vec![9, 10, 11, 2, 0],
        ])?;

        let pooled = max_pool(&image, (3, 1), None, 0, 0)?;
        assert_eq!(
            pooled.size(),
            ImageSize {
                width: 2,
                height: 1
            }
        );
        assert_eq!(pooled.as_slice(), &[9, 8]);
        Ok(())
    }

    #[test]
    fn max_pool_with_padding() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![1, 2], vec![3, 4]])?;
        let pooled = max_pool(&image, (2, 2), Some(1), 1, 7)?;

        assert_eq!(
            pooled.size(),
            ImageSize {
                width: 3,
                height: 3
            }
        );
        assert_eq!(pooled.as_slice(), &[7, 7, 7, 7, 4, 7, 7, 7, 7]);
        Ok(())
    }

    #[test]
    fn max_pool_window_too_large() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![1, 2]])?;
        assert!(max_pool(&image, (2, 2), None, 0, 0)?.is_empty());
        Ok(())
    }

    #[test]
    fn max_pool_invalid() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![1, 2]])?;
        assert_eq!(
            max_pool(&image, (0, 2), None, 0, 0),
            Err(ImageError::InvalidKernelSize(0))
        );
        assert_eq!(
            max_pool(&image, (1, 1), Some(0), 0, 0),
            Err(ImageError::InvalidKernelSize(0))
        );
        Ok(())
    }
}
