use glyph_image::{Image, ImageError};

use crate::histogram::dominant_value;
use crate::padding::{pad_image, Padding2D, PaddingMode};
use crate::parallel;

/// Reduce every `kernel_size x kernel_size` neighbourhood of an image to a single value.
///
/// The image is padded with `pad_value` by `(k - 1) / 2` pixels before and `k / 2` pixels
/// after on both axes, so the result keeps the size of `src`. For even sizes the window
/// extends further towards the bottom right.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `kernel_size` - The side of the square window.
/// * `pad_value` - The value of the pixels outside the image.
/// * `reducer` - Called with the row-major values of each window.
///
/// # Errors
///
/// Returns an error if `kernel_size` is zero.
pub fn sliding_window_reduce<F>(
    src: &Image<u8, 1>,
    kernel_size: usize,
    pad_value: u8,
    reducer: F,
) -> Result<Image<u8, 1>, ImageError>
where
    F: Fn(&[u8]) -> u8 + Send + Sync,
{
    if kernel_size == 0 {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }

    if src.is_empty() {
        return Ok(src.clone());
    }

    let padded = pad_image(
        src,
        Padding2D::for_window(kernel_size),
        PaddingMode::Constant,
        [pad_value],
    )?;

    let mut dst = Image::from_size_val(src.size(), 0u8)?;

    let padded_cols = padded.cols();
    let padded_data = padded.as_slice();

    parallel::par_fill_rows(&mut dst, |y, dst_row| {
        let mut window = Vec::with_capacity(kernel_size * kernel_size);
        for (x, out) in dst_row.iter_mut().enumerate() {
            window.clear();
            for ky in 0..kernel_size {
                let offset = (y + ky) * padded_cols + x;
                window.extend_from_slice(&padded_data[offset..offset + kernel_size]);
            }
            *out = reducer(&window);
        }
    });

    Ok(dst)
}

/// Dilate an image with a square structuring element.
///
/// Each pixel is replaced by the maximum of its window, with zeros outside the image.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::morphology::dilate;
///
/// let image = Image::<u8, 1>::from_rows(&[
///     vec![0, 0, 0],
///     vec![0, 9, 0],
///     vec![0, 0, 0],
/// ]).unwrap();
///
/// let dilated = dilate(&image, 3).unwrap();
/// assert_eq!(dilated.as_slice(), &[9; 9]);
/// ```
pub fn dilate(src: &Image<u8, 1>, kernel_size: usize) -> Result<Image<u8, 1>, ImageError> {
    log::debug!("dilate: kernel_size={kernel_size}");
    sliding_window_reduce(src, kernel_size, 0, |window| {
        window.iter().copied().max().unwrap_or(0)
    })
}

/// Erode an image with a square structuring element.
///
/// Each pixel is replaced by the minimum of its window. Pixels outside the image take
/// `fill`, or the dominant value of the image when `fill` is `None`.
pub fn erode(
    src: &Image<u8, 1>,
    kernel_size: usize,
    fill: Option<u8>,
) -> Result<Image<u8, 1>, ImageError> {
    let fill = fill.unwrap_or_else(|| dominant_value(src));
    log::debug!("erode: kernel_size={kernel_size}, fill={fill}");
    sliding_window_reduce(src, kernel_size, fill, |window| {
        window.iter().copied().min().unwrap_or(0)
    })
}

/// The pixels removed by an erosion: `src - erode(src)`, saturating at zero.
pub fn get_boundaries(
    src: &Image<u8, 1>,
    kernel_size: usize,
    fill: Option<u8>,
) -> Result<Image<u8, 1>, ImageError> {
    let eroded = erode(src, kernel_size, fill)?;
    let mut dst = Image::from_size_val(src.size(), 0u8)?;

    parallel::par_iter_rows_val_two(src, &eroded, &mut dst, |&a, &b, out| {
        *out = a.saturating_sub(b);
    });

    Ok(dst)
}

/// Morphological opening: an erosion followed by a dilation.
pub fn open(
    src: &Image<u8, 1>,
    kernel_size: usize,
    fill: Option<u8>,
) -> Result<Image<u8, 1>, ImageError> {
    dilate(&erode(src, kernel_size, fill)?, kernel_size)
}

/// Morphological closing: a dilation followed by an erosion.
///
/// The erosion fill defaults to the dominant value of `src`, not of the dilated image.
pub fn close(
    src: &Image<u8, 1>,
    kernel_size: usize,
    fill: Option<u8>,
) -> Result<Image<u8, 1>, ImageError> {
    let fill = fill.unwrap_or_else(|| dominant_value(src));
    erode(&dilate(src, kernel_size)?, kernel_size, Some(fill))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_image::ImageSize;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn sum(image: &Image<u8, 1>) -> u32 {
        image.as_slice().iter().map(|&v| v as u32).sum()
    }

    fn random_binary(rng: &mut StdRng, size: ImageSize) -> Result<Image<u8, 1>, ImageError> {
        let data = (0..size.area())
            .map(|_| if rng.random_bool(0.4) { 255 } else { 0 })
            .collect();
        Image::new(size, data)
    }

    #[test]
    fn kernel_size_one_is_identity() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]])?;
        assert_eq!(dilate(&image, 1)?, image);
        assert_eq!(erode(&image, 1, None)?, image);
        Ok(())
    }

    #[test]
    fn kernel_size_zero() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![1]])?;
        assert_eq!(dilate(&image, 0), Err(ImageError::InvalidKernelSize(0)));
        Ok(())
    }

    #[test]
    fn even_kernel_window_extends_down_right() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![0, 0, 0], vec![0, 5, 0], vec![0, 0, 0]])?;
        let dilated = dilate(&image, 2)?;

        #[rustfmt::skip]
        assert_eq!(
            dilated.as_slice(),
            &[
                5, 5, 0,
                5, 5, 0,
                0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn erode_with_dominant_fill() -> Result<(), ImageError> {
        // a white background is kept at the border when the fill is derived
        let image = Image::<u8, 1>::from_rows(&[
            vec![255, 255, 255, 255],
            vec![255, 0, 255, 255],
            vec![255, 255, 255, 255],
        ])?;

        let eroded = erode(&image, 3, None)?;
        assert_eq!(*eroded.get_pixel(3, 0, 0)?, 255);
        assert_eq!(*eroded.get_pixel(2, 2, 0)?, 0);

        let eroded = erode(&image, 3, Some(0))?;
        assert_eq!(*eroded.get_pixel(3, 0, 0)?, 0);
        Ok(())
    }

    #[test]
    fn boundaries_of_a_square() -> Result<(), ImageError> {
        let mut rows = vec![vec![0u8; 5]; 5];
        for row in rows.iter_mut().take(4).skip(1) {
            row[1..4].fill(200);
        }
        let image = Image::<u8, 1>::from_rows(&rows)?;

        let boundaries = get_boundaries(&image, 3, Some(0))?;
        assert_eq!(boundaries.count_nonzero(), 8);
        assert_eq!(*boundaries.get_pixel(2, 2, 0)?, 0);
        Ok(())
    }

    #[test]
    fn dilate_erode_monotonic() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(42);
        for k in 1..5 {
            let image = random_binary(
                &mut rng,
                ImageSize {
                    width: 12,
                    height: 9,
                },
            )?;
            assert!(sum(&dilate(&image, k)?) >= sum(&image));
            assert!(sum(&erode(&image, k, Some(0))?) <= sum(&image));
        }
        Ok(())
    }

    #[test]
    fn dilate_strict_on_boundary() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![0, 0, 0, 0], vec![0, 0, 255, 0]])?;
        assert!(sum(&dilate(&image, 2)?) > sum(&image));
        Ok(())
    }

    #[test]
    fn opening_is_idempotent() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(3);
        for k in [1, 3] {
            for _ in 0..20 {
                let image = random_binary(
                    &mut rng,
                    ImageSize {
                        width: 10,
                        height: 10,
                    },
                )?;
                let once = open(&image, k, Some(0))?;
                assert_eq!(open(&once, k, Some(0))?, once);
            }
        }
        Ok(())
    }

    #[test]
    fn morphology_on_empty_image() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        )?;
        assert!(close(&image, 2, None)?.is_empty());
        assert!(get_boundaries(&image, 2, None)?.is_empty());
        Ok(())
    }
}
