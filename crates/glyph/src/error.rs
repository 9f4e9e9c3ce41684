use glyph_augment::AugmentError;
use glyph_image::ImageError;
use glyph_io::IoError;

/// An error type for the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error raised by the augmentation stage.
    #[error(transparent)]
    Augment(#[from] AugmentError),

    /// Error raised while decoding or encoding a file.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error to read the configuration file.
    #[error("Failed to read the configuration file. {0}")]
    ConfigFile(#[from] std::io::Error),

    /// Error to parse the configuration.
    #[error("Failed to parse the configuration. {0}")]
    ConfigParse(#[from] serde_json::Error),
}
