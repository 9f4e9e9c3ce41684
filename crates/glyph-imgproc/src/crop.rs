use glyph_image::{Image, ImageError, ImageSize};

use crate::parallel;

/// Crop an image to a specified region.
///
/// The region has the size of `dst` and its top-left corner at `(x, y)` in `src`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Errors
///
/// Returns an error if the region does not fit inside `src`.
///
/// # Examples
///
/// ```rust
/// use glyph_image::{Image, ImageSize};
/// use glyph_imgproc::crop::crop_image;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0u8).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if x + dst.cols() > src.cols() || y + dst.rows() > src.rows() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            x + dst.cols(),
            y + dst.rows(),
        ));
    }

    let src_stride = src.cols() * C;
    let dst_stride = dst.cols() * C;
    let src_data = src.as_slice();

    parallel::par_fill_rows(dst, |i, dst_row| {
        let offset = (y + i) * src_stride + x * C;
        dst_row.copy_from_slice(&src_data[offset..offset + dst_stride]);
    });

    Ok(())
}

/// Allocate and return the `size` region of `src` starting at `(x, y)`.
pub fn crop<T, const C: usize>(
    src: &Image<T, C>,
    x: usize,
    y: usize,
    size: ImageSize,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let mut dst = Image::from_size_val(size, T::default())?;
    crop_image(src, &mut dst, x, y)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use glyph_image::{Image, ImageError, ImageSize};

    #[test]
    fn crop_rgb() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 2,
                height: 3,
            },
            vec![
                0u8, 1, 2, 3, 4, 5,
                6u8, 7, 8, 9, 10, 11,
                12u8, 13, 14, 15, 16, 17,
            ],
        )?;

        let cropped = super::crop(
            &image,
            1,
            1,
            ImageSize {
                width: 1,
                height: 2,
            },
        )?;

        assert_eq!(cropped.as_slice(), &[9u8, 10, 11, 15, 16, 17]);

        Ok(())
    }

    #[test]
    fn crop_out_of_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![1, 2], vec![3, 4]])?;
        let res = super::crop(
            &image,
            1,
            0,
            ImageSize {
                width: 2,
                height: 2,
            },
        );
        assert_eq!(res, Err(ImageError::InvalidImageSize(2, 2, 3, 2)));

        Ok(())
    }
}
