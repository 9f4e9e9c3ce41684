use std::path::Path;

use glyph_image::{GenericImage, Image};

use crate::error::IoError;
use crate::functional;

/// Decodes image files into RGB matrices and encodes matrices back to files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageHandler {
    /// Create the missing parent directories of a saved file.
    pub create_dirs: bool,
}

impl ImageHandler {
    /// Create a handler that writes only into existing directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a file as 8-bit RGB.
    ///
    /// # Returns
    ///
    /// The RGB image together with its width and height.
    pub fn open_image(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<(Image<u8, 3>, usize, usize), IoError> {
        let image = functional::read_image_any_rgb8(file_path)?;
        let (width, height) = (image.width(), image.height());
        Ok((image, width, height))
    }

    /// Encode an image to a file. The format follows the file extension.
    pub fn save(&self, file_path: impl AsRef<Path>, image: &GenericImage) -> Result<(), IoError> {
        let file_path = file_path.as_ref();
        if self.create_dirs {
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }
        functional::write_image(file_path, image)
    }
}
