use glyph_augment::AugmentationOrchestrator;
use glyph_image::{GenericImage, Image, ImageError};
use glyph_imgproc::{
    color,
    normalize::{self, NormalizationMode},
    resize,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

/// A random source seeded with `seed + stream`, or from OS entropy without a seed.
pub fn seeded_rng(seed: Option<u64>, stream: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
        None => StdRng::from_os_rng(),
    }
}

/// Grayscale conversion, geometry standardization, augmentation and z-score
/// normalization of a single image.
///
/// # Example
///
/// ```
/// use glyph::{PipelineConfig, TransformPipeline};
/// use glyph::image::{Image, ImageSize};
///
/// let mut digit = Image::<u8, 1>::from_size_val(ImageSize { width: 40, height: 60 }, 0).unwrap();
/// for y in 10..50 {
///     for x in 15..25 {
///         digit.set_pixel(x, y, 0, 255).unwrap();
///     }
/// }
///
/// let config = PipelineConfig { repeats: Some(2), seed: Some(0), ..Default::default() };
/// let pipeline = TransformPipeline::new(config).unwrap();
/// let samples = pipeline.apply(&digit.into()).unwrap();
///
/// assert!(samples.len() <= 2);
/// for sample in samples {
///     assert_eq!(sample.size(), ImageSize { width: 28, height: 28 });
/// }
/// ```
#[derive(Debug)]
pub struct TransformPipeline {
    config: PipelineConfig,
    orchestrator: AugmentationOrchestrator,
}

impl TransformPipeline {
    /// Create a pipeline, failing on an unusable geometry or augmentation configuration.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let target = config.target_size;
        if target.width <= 2 * config.padding || target.height <= 2 * config.padding {
            return Err(ImageError::InvalidPadding {
                padding: config.padding,
                width: target.width,
                height: target.height,
            }
            .into());
        }

        let orchestrator = AugmentationOrchestrator::new(config.augment.clone())?;
        Ok(Self {
            config,
            orchestrator,
        })
    }

    /// The configuration of the pipeline.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Reduce an image to a single 8-bit channel of the configured geometry.
    pub fn standardize(&self, src: &GenericImage) -> Result<Image<u8, 1>, PipelineError> {
        let gray = color::to_gray_u8(src)?;
        let standard = resize::prepare_standard_geometry(
            &gray,
            self.config.target_size,
            self.config.padding,
            self.config.pad_value,
        )?;
        Ok(standard)
    }

    /// Run the pipeline with a random source derived from the configured seed.
    pub fn apply(&self, src: &GenericImage) -> Result<Vec<Image<f32, 1>>, PipelineError> {
        let mut rng = seeded_rng(self.config.seed, 0);
        self.apply_with_rng(src, &mut rng)
    }

    /// Run the pipeline with an explicit random source.
    ///
    /// Returns one z-score normalized image per accepted augmentation, which may be fewer
    /// than the requested repeats.
    pub fn apply_with_rng<R: Rng>(
        &self,
        src: &GenericImage,
        rng: &mut R,
    ) -> Result<Vec<Image<f32, 1>>, PipelineError> {
        let standard = self.standardize(src)?;
        let samples = self
            .orchestrator
            .augment(&standard, self.config.repeats, rng)?;
        log::debug!("{} augmented samples", samples.len());

        let normalized = samples
            .iter()
            .map(|sample| normalize::process(sample, NormalizationMode::ZScore))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(normalized)
    }
}
