use glyph_image::{ops::saturate_u8, GenericImage, Image, ImageError};

use super::gray::{gray_from_rgb, gray_from_rgb_u8, gray_from_rgba_u8, rgb_from_gray};

fn saturate<const C: usize>(src: &Image<f32, C>) -> Result<Image<u8, C>, ImageError> {
    Image::new(
        src.size(),
        src.as_slice().iter().map(|&v| saturate_u8(v)).collect(),
    )
}

/// Convert an image between its single channel and its RGB representation.
///
/// With `to_gray` the result is always [`GenericImage::L8`]: single channel inputs are kept and
/// color inputs are reduced by luma over their first three channels. Without it, color inputs
/// are kept and single channel inputs are replicated into [`GenericImage::Rgb8`].
///
/// The output is always 8-bit. Float values are clamped into `[0, 255]` and truncated.
///
/// # Example
///
/// ```
/// use glyph_image::{GenericImage, Image};
/// use glyph_imgproc::color::convert_color_space;
///
/// let rgb = Image::<u8, 3>::from_rows(&[vec![255, 0, 0, 0, 255, 0]]).unwrap();
///
/// let gray = convert_color_space(&GenericImage::Rgb8(rgb), true).unwrap();
///
/// match gray {
///     GenericImage::L8(gray) => assert_eq!(gray.as_slice(), &[76, 149]),
///     _ => unreachable!(),
/// }
/// ```
pub fn convert_color_space(src: &GenericImage, to_gray: bool) -> Result<GenericImage, ImageError> {
    let converted = match (src, to_gray) {
        (GenericImage::L8(img), true) => GenericImage::L8(img.clone()),
        (GenericImage::L32F(img), true) => GenericImage::L8(saturate(img)?),
        (GenericImage::Rgb8(img), true) => {
            let mut gray = Image::from_size_val(img.size(), 0u8)?;
            gray_from_rgb_u8(img, &mut gray)?;
            GenericImage::L8(gray)
        }
        (GenericImage::Rgba8(img), true) => {
            let mut gray = Image::from_size_val(img.size(), 0u8)?;
            gray_from_rgba_u8(img, &mut gray)?;
            GenericImage::L8(gray)
        }
        (GenericImage::Rgb32F(img), true) => {
            let mut gray = Image::from_size_val(img.size(), 0f32)?;
            gray_from_rgb(img, &mut gray)?;
            GenericImage::L8(saturate(&gray)?)
        }
        (GenericImage::Rgb8(img), false) => GenericImage::Rgb8(img.clone()),
        (GenericImage::Rgba8(img), false) => GenericImage::Rgba8(img.clone()),
        (GenericImage::Rgb32F(img), false) => GenericImage::Rgb8(saturate(img)?),
        (GenericImage::L8(img), false) => {
            let mut rgb = Image::from_size_val(img.size(), 0u8)?;
            rgb_from_gray(img, &mut rgb)?;
            GenericImage::Rgb8(rgb)
        }
        (GenericImage::L32F(img), false) => {
            let gray = saturate(img)?;
            let mut rgb = Image::from_size_val(img.size(), 0u8)?;
            rgb_from_gray(&gray, &mut rgb)?;
            GenericImage::Rgb8(rgb)
        }
    };

    Ok(converted)
}

/// Reduce any image to a single 8-bit channel.
///
/// Shorthand for [`convert_color_space`] with `to_gray` set.
pub fn to_gray_u8(src: &GenericImage) -> Result<Image<u8, 1>, ImageError> {
    match convert_color_space(src, true)? {
        GenericImage::L8(gray) => Ok(gray),
        other => Err(ImageError::InvalidChannelShape(other.num_channels(), 1)),
    }
}
