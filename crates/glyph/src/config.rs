use std::path::Path;

use glyph_augment::AugmentConfig;
use glyph_image::ImageSize;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Configuration of the transform pipeline.
///
/// Missing fields take their default values when deserialized.
///
/// # Example
///
/// ```
/// use glyph::PipelineConfig;
///
/// let config = PipelineConfig::from_json_str(r#"{ "padding": 4, "seed": 7 }"#).unwrap();
///
/// assert_eq!(config.padding, 4);
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.target_size.width, 28);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// The size of every standardized image, padding included.
    pub target_size: ImageSize,
    /// Border added on every side of the resized content.
    pub padding: usize,
    /// Value of the border pixels.
    pub pad_value: u8,
    /// Samples requested per channel, drawn from `[2, 5)` when `None`.
    pub repeats: Option<usize>,
    /// Base seed of the random sources, OS entropy when `None`.
    pub seed: Option<u64>,
    /// Reject input files without exactly three channels.
    pub strict_channels: bool,
    /// Configuration of the augmentation stage.
    pub augment: AugmentConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_size: ImageSize {
                width: 28,
                height: 28,
            },
            padding: 2,
            pad_value: 0,
            repeats: None,
            seed: None,
            strict_channels: false,
            augment: AugmentConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration from a JSON file.
    pub fn from_json_file(file_path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let json = std::fs::read_to_string(file_path)?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() -> Result<(), PipelineError> {
        assert_eq!(PipelineConfig::from_json_str("{}")?, PipelineConfig::default());
        Ok(())
    }

    #[test]
    fn nested_augment_config() -> Result<(), PipelineError> {
        let config = PipelineConfig::from_json_str(
            r#"{
                "target_size": { "width": 32, "height": 24 },
                "repeats": 3,
                "augment": { "morph_kernel_size": 3, "noise_std_range": [1.0, 2.0] }
            }"#,
        )?;
        assert_eq!(
            config.target_size,
            ImageSize {
                width: 32,
                height: 24
            }
        );
        assert_eq!(config.repeats, Some(3));
        assert_eq!(config.augment.morph_kernel_size, 3);
        assert_eq!(config.augment.noise_std_range, (1.0, 2.0));
        assert_eq!(config.augment.attempts_per_sample, 100);
        Ok(())
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            PipelineConfig::from_json_str("{ padding: }"),
            Err(PipelineError::ConfigParse(_))
        ));
    }

    #[test]
    fn config_file() -> Result<(), PipelineError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("pipeline.json");
        std::fs::write(&file_path, r#"{ "pad_value": 255 }"#)?;
        assert_eq!(PipelineConfig::from_json_file(&file_path)?.pad_value, 255);

        assert!(matches!(
            PipelineConfig::from_json_file(tmp_dir.path().join("missing.json")),
            Err(PipelineError::ConfigFile(_))
        ));
        Ok(())
    }
}
