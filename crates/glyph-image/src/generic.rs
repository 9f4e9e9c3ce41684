use crate::{Image, ImageSize};

/// A generic image type that can hold any of the supported pixel layouts.
///
/// Decoders produce it and the color space conversion consumes it, so the number of
/// channels of a matrix is known only at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
    /// 32-bit float grayscale image
    L32F(Image<f32, 1>),
    /// 32-bit float RGB image
    Rgb32F(Image<f32, 3>),
}

impl GenericImage {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::L8(img) => img.size(),
            GenericImage::Rgb8(img) => img.size(),
            GenericImage::Rgba8(img) => img.size(),
            GenericImage::L32F(img) => img.size(),
            GenericImage::Rgb32F(img) => img.size(),
        }
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::L8(_) | GenericImage::L32F(_) => 1,
            GenericImage::Rgb8(_) | GenericImage::Rgb32F(_) => 3,
            GenericImage::Rgba8(_) => 4,
        }
    }

    /// Whether the image has a color axis.
    pub fn is_color(&self) -> bool {
        self.num_channels() > 1
    }
}

impl From<Image<u8, 1>> for GenericImage {
    fn from(image: Image<u8, 1>) -> Self {
        GenericImage::L8(image)
    }
}

impl From<Image<u8, 3>> for GenericImage {
    fn from(image: Image<u8, 3>) -> Self {
        GenericImage::Rgb8(image)
    }
}

impl From<Image<u8, 4>> for GenericImage {
    fn from(image: Image<u8, 4>) -> Self {
        GenericImage::Rgba8(image)
    }
}

impl From<Image<f32, 1>> for GenericImage {
    fn from(image: Image<f32, 1>) -> Self {
        GenericImage::L32F(image)
    }
}

impl From<Image<f32, 3>> for GenericImage {
    fn from(image: Image<f32, 3>) -> Self {
        GenericImage::Rgb32F(image)
    }
}

#[cfg(test)]
mod tests {
    use super::GenericImage;
    use crate::{Image, ImageError, ImageSize};

    #[test]
    fn generic_layouts() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 2,
        };
        let gray: GenericImage = Image::<u8, 1>::from_size_val(size, 0)?.into();
        let rgba: GenericImage = Image::<u8, 4>::from_size_val(size, 0)?.into();

        assert_eq!(gray.num_channels(), 1);
        assert!(!gray.is_color());
        assert_eq!(rgba.num_channels(), 4);
        assert!(rgba.is_color());
        assert_eq!(rgba.size(), size);
        Ok(())
    }
}
