use std::path::Path;

use glyph_image::{ops::saturate_u8, GenericImage, Image, ImageSize};

use crate::error::IoError;

fn decode(file_path: &Path) -> Result<image::DynamicImage, IoError> {
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    Ok(img)
}

fn image_size(img: &image::DynamicImage) -> ImageSize {
    ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate. Gray, RGB,
/// RGBA and float RGB data keep their layout; every other layout is converted to RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let img = decode(file_path.as_ref())?;
    let size = image_size(&img);

    let image = match img.color() {
        image::ColorType::L8 => GenericImage::L8(Image::new(size, img.into_luma8().into_raw())?),
        image::ColorType::Rgb8 => GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
        image::ColorType::Rgba8 => {
            GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?)
        }
        image::ColorType::Rgb32F => {
            GenericImage::Rgb32F(Image::new(size, img.into_rgb32f().into_raw())?)
        }
        other => {
            log::debug!("decoded {other:?} data, converting to rgb8");
            GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?)
        }
    };

    Ok(image)
}

/// Reads an image from the given file path as 8-bit RGB.
///
/// Gray images are replicated into three channels and alpha is dropped.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let img = decode(file_path.as_ref())?;
    let size = image_size(&img);
    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

fn save_buffer(
    file_path: &Path,
    data: &[u8],
    size: ImageSize,
    color: image::ColorType,
) -> Result<(), IoError> {
    image::save_buffer(
        file_path,
        data,
        size.width as u32,
        size.height as u32,
        color,
    )
    .map_err(|e| IoError::ImageEncodeError(e.to_string()))
}

fn saturate_all(data: &[f32]) -> Vec<u8> {
    data.iter().map(|&v| saturate_u8(v)).collect()
}

/// Writes the given image to the given file path.
///
/// The format is chosen from the file extension. Float images are clamped into
/// `[0, 255]` and truncated to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to the output image.
/// * `img` - The image to encode.
pub fn write_image(file_path: impl AsRef<Path>, img: &GenericImage) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let size = img.size();

    match img {
        GenericImage::L8(img) => save_buffer(file_path, img.as_slice(), size, image::ColorType::L8),
        GenericImage::Rgb8(img) => {
            save_buffer(file_path, img.as_slice(), size, image::ColorType::Rgb8)
        }
        GenericImage::Rgba8(img) => {
            save_buffer(file_path, img.as_slice(), size, image::ColorType::Rgba8)
        }
        GenericImage::L32F(img) => save_buffer(
            file_path,
            &saturate_all(img.as_slice()),
            size,
            image::ColorType::L8,
        ),
        GenericImage::Rgb32F(img) => save_buffer(
            file_path,
            &saturate_all(img.as_slice()),
            size,
            image::ColorType::Rgb8,
        ),
    }
}
