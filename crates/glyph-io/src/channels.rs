use std::path::Path;

use glyph_image::{GenericImage, Image, ImageError};
use glyph_imgproc::color::convert_color_space;

use crate::error::IoError;
use crate::functional;

/// Number of channels every decoded image is brought to.
pub const RGB_CHANNELS: usize = 3;

fn drop_alpha(src: &Image<u8, 4>) -> Result<Image<u8, 3>, ImageError> {
    let data = src
        .as_slice()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();
    Image::new(src.size(), data)
}

/// Decodes an image into one single-channel matrix per RGB channel.
///
/// In strict mode any image that does not carry exactly three channels is rejected.
/// Otherwise gray images are replicated and alpha is dropped, with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelConverter {
    /// Reject images without exactly three channels.
    pub strict: bool,
}

impl ChannelConverter {
    /// Create a converter.
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Split a decoded image into its R, G and B channels.
    pub fn split(&self, image: &GenericImage) -> Result<Vec<Image<u8, 1>>, IoError> {
        let num_channels = image.num_channels();
        if num_channels != RGB_CHANNELS {
            if self.strict {
                return Err(IoError::UnsupportedChannelCount(num_channels, RGB_CHANNELS));
            }
            log::warn!("coercing a {num_channels}-channel image to {RGB_CHANNELS} channels");
        }

        let rgb = match image {
            GenericImage::Rgb8(img) => img.clone(),
            GenericImage::Rgba8(img) => drop_alpha(img)?,
            other => match convert_color_space(other, false)? {
                GenericImage::Rgb8(img) => img,
                converted => {
                    return Err(IoError::UnsupportedChannelCount(
                        converted.num_channels(),
                        RGB_CHANNELS,
                    ))
                }
            },
        };

        Ok(rgb.split_channels()?)
    }

    /// Decode a file and split it into its R, G and B channels.
    pub fn read_channels(&self, file_path: impl AsRef<Path>) -> Result<Vec<Image<u8, 1>>, IoError> {
        let image = functional::read_image_any(file_path)?;
        log::debug!(
            "decoded {}x{} image with {} channels",
            image.size().width,
            image.size().height,
            image.num_channels()
        );
        self.split(&image)
    }
}
