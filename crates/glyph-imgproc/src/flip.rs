use glyph_image::{Image, ImageError};

use crate::parallel;

/// Flip the input image horizontally.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::flip::horizontal_flip;
///
/// let image = Image::<u8, 1>::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
///
/// let flipped = horizontal_flip(&image).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[3, 2, 1, 6, 5, 4]);
/// ```
pub fn horizontal_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = src.clone();
    let src_stride = src.cols() * C;
    let src_data = src.as_slice();

    parallel::par_fill_rows(&mut dst, |y, dst_row| {
        let src_row = &src_data[y * src_stride..][..src_stride];
        dst_row
            .chunks_exact_mut(C)
            .zip(src_row.chunks_exact(C).rev())
            .for_each(|(dst_pixel, src_pixel)| dst_pixel.copy_from_slice(src_pixel));
    });

    Ok(dst)
}

/// Flip the input image vertically.
///
/// # Arguments
///
/// * `src` - The input image with shape (H, W, C).
///
/// # Returns
///
/// The flipped image.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::flip::vertical_flip;
///
/// let image = Image::<u8, 1>::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
///
/// let flipped = vertical_flip(&image).unwrap();
///
/// assert_eq!(flipped.as_slice(), &[4, 5, 6, 1, 2, 3]);
/// ```
pub fn vertical_flip<T, const C: usize>(src: &Image<T, C>) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = src.clone();
    let rows = src.rows();
    let src_stride = src.cols() * C;
    let src_data = src.as_slice();

    parallel::par_fill_rows(&mut dst, |y, dst_row| {
        dst_row.copy_from_slice(&src_data[(rows - 1 - y) * src_stride..][..src_stride]);
    });

    Ok(dst)
}
