/// An error type for the image and image processing modules.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes do not match.
    #[error("Image size mismatch: {0}x{1} vs {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a pixel value cannot be cast to the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),

    /// Error when the channel index is out of bounds.
    #[error("Channel index {0} is out of bounds {1}")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel ({0}, {1}) is out of bounds for an image of size {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the image holds no data.
    #[error("Image data is not initialized")]
    ImageDataNotInitialized,

    /// Error when a kernel, window or stride size is not usable.
    #[error("Invalid kernel size: {0}")]
    InvalidKernelSize(usize),

    /// Error when the kernel data does not form a square matrix.
    #[error("Kernel data of length {0} is not a square of side {1}")]
    NonSquareKernel(usize, usize),

    /// Error when the padding leaves no room for the image content.
    #[error("Padding {padding} leaves no inner area in a {width}x{height} target")]
    InvalidPadding {
        /// requested padding on every side
        padding: usize,
        /// target width
        width: usize,
        /// target height
        height: usize,
    },

    /// Error when a value range is not usable.
    #[error("Invalid value range [{0}, {1}]")]
    InvalidRange(f32, f32),
}
