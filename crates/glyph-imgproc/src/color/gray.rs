use crate::parallel;
use glyph_image::{ops::saturate_u8, Image, ImageError};

// ITU-R BT.601 luma weights.
const RW: f32 = 0.299;
const GW: f32 = 0.587;
const BW: f32 = 0.114;

#[inline]
fn luma(r: f32, g: f32, b: f32) -> f32 {
    RW * r + GW * g + BW * b
}

fn check_size<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &Image<T2, C2>,
) -> Result<(), ImageError> {
    if src.size() == dst.size() {
        return Ok(());
    }
    Err(ImageError::InvalidImageSize(
        src.cols(),
        src.rows(),
        dst.cols(),
        dst.rows(),
    ))
}

/// Luma of a floating point RGB image, `0.299 R + 0.587 G + 0.114 B`.
///
/// `dst` must have the size of `src`.
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::color::gray_from_rgb;
///
/// let rgb = Image::<f32, 3>::from_rows(&[vec![0.0, 1.0, 0.0]]).unwrap();
/// let mut gray = Image::<f32, 1>::from_size_val(rgb.size(), 0.0).unwrap();
///
/// gray_from_rgb(&rgb, &mut gray).unwrap();
/// assert!((gray.as_slice()[0] - 0.587).abs() < 1e-6);
/// ```
pub fn gray_from_rgb(src: &Image<f32, 3>, dst: &mut Image<f32, 1>) -> Result<(), ImageError> {
    check_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |rgb, out| {
        out[0] = luma(rgb[0], rgb[1], rgb[2]);
    });

    Ok(())
}

/// Luma of an 8-bit RGB image. The weighted sum is truncated, not rounded.
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::color::gray_from_rgb_u8;
///
/// let rgb = Image::<u8, 3>::from_rows(&[vec![255, 0, 0, 0, 255, 0]]).unwrap();
/// let mut gray = Image::<u8, 1>::from_size_val(rgb.size(), 0).unwrap();
///
/// gray_from_rgb_u8(&rgb, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[76, 149]);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    check_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |rgb, out| {
        out[0] = saturate_u8(luma(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32));
    });

    Ok(())
}

/// Same as [`gray_from_rgb_u8`] with the alpha channel ignored.
pub fn gray_from_rgba_u8(src: &Image<u8, 4>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    check_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |rgba, out| {
        out[0] = saturate_u8(luma(rgba[0] as f32, rgba[1] as f32, rgba[2] as f32));
    });

    Ok(())
}

/// Replicate a single channel into the three channels of `dst`.
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::color::rgb_from_gray;
///
/// let gray = Image::<u8, 1>::from_rows(&[vec![7, 9]]).unwrap();
/// let mut rgb = Image::<u8, 3>::from_size_val(gray.size(), 0).unwrap();
///
/// rgb_from_gray(&gray, &mut rgb).unwrap();
/// assert_eq!(rgb.as_slice(), &[7, 7, 7, 9, 9, 9]);
/// ```
pub fn rgb_from_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 3>) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    check_size(src, dst)?;

    parallel::par_iter_rows(src, dst, |gray, out| out.fill(gray[0]));

    Ok(())
}
