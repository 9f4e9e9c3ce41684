use std::collections::BTreeSet;
use std::fmt;

use glyph_image::{Image, ImageError};
use glyph_imgproc::morphology::{self, MorphFilterMode};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AugmentError;
use crate::geometric::{self, Direction};
use crate::noise::{NoiseAugmentor, DEFAULT_PROB_RANGE, DEFAULT_STD_RANGE};
use crate::step::{default_catalog, AugmentationFamily, AugmentationKind, CatalogFamily};

/// Number of steps in a pipeline, each from a distinct family.
pub const PIPELINE_LENGTH: usize = 3;

/// Added to the bounding box width before computing its aspect ratio.
pub const ASPECT_RATIO_EPSILON: f32 = 1e-8;

/// Configuration of the augmentation orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    /// Side of the structuring element used by the morphology steps.
    ///
    /// Defaults to 2. A 1x1 element leaves every image unchanged, so the morphology
    /// family would be a no-op at size 1.
    pub morph_kernel_size: usize,
    /// Attempts allowed per requested sample before giving up.
    pub attempts_per_sample: usize,
    /// Exclusive lower bound of the foreground retention ratio.
    pub min_retention: f32,
    /// Exclusive upper bound of the foreground retention ratio.
    pub max_retention: f32,
    /// Smallest accepted `height / width` of the foreground bounding box.
    pub min_aspect_ratio: f32,
    /// Range of the gaussian noise standard deviation.
    pub noise_std_range: (f32, f32),
    /// Range of the salt and pepper probability.
    pub noise_prob_range: (f32, f32),
    /// The families and kinds pipelines are sampled from.
    pub catalog: Vec<CatalogFamily>,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            morph_kernel_size: 2,
            attempts_per_sample: 100,
            min_retention: 0.2,
            max_retention: 3.0,
            min_aspect_ratio: 0.2,
            noise_std_range: DEFAULT_STD_RANGE,
            noise_prob_range: DEFAULT_PROB_RANGE,
            catalog: default_catalog(),
        }
    }
}

impl AugmentConfig {
    /// Check the catalog and the acceptance bounds.
    pub fn validate(&self) -> Result<(), AugmentError> {
        let mut families = BTreeSet::new();
        for entry in &self.catalog {
            if !families.insert(entry.family) {
                return Err(AugmentError::DuplicateFamily(entry.family));
            }
            if entry.kinds.is_empty() {
                return Err(AugmentError::EmptyFamily(entry.family));
            }
            if let Some(kind) = entry.kinds.iter().find(|k| k.family() != entry.family) {
                return Err(AugmentError::MisplacedKind(*kind, entry.family));
            }
        }
        if families.len() < PIPELINE_LENGTH {
            return Err(AugmentError::NotEnoughFamilies(
                families.len(),
                PIPELINE_LENGTH,
            ));
        }

        if self.morph_kernel_size == 0 {
            return Err(ImageError::InvalidKernelSize(0).into());
        }
        if !(self.min_retention.is_finite()
            && self.max_retention.is_finite()
            && self.min_retention < self.max_retention)
        {
            return Err(AugmentError::InvalidBounds(format!(
                "retention range ({}, {}) is empty",
                self.min_retention, self.max_retention
            )));
        }
        if !self.min_aspect_ratio.is_finite() {
            return Err(AugmentError::InvalidBounds(format!(
                "minimum aspect ratio {} is not finite",
                self.min_aspect_ratio
            )));
        }
        Ok(())
    }
}

/// Reason a sampled pipeline is never applied.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incompatibility {
    /// More than one rotation step.
    #[error("more than one rotation")]
    MultipleRotations,
    /// A rotation together with a morphology step.
    #[error("rotation combined with morphology")]
    RotationWithMorphology,
    /// A dilation together with an erosion.
    #[error("dilation combined with erosion")]
    DilateWithErode,
    /// A vertical flip, which turns most glyphs into other glyphs.
    #[error("vertical flip")]
    VerticalFlip,
    /// Boundaries together with an erosion.
    #[error("boundaries combined with erosion")]
    BoundariesWithErode,
}

/// Reason an augmented image is discarded.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// The pipeline was not applied.
    #[error("incompatible pipeline: {0}")]
    Incompatible(#[from] Incompatibility),
    /// The foreground grew or shrank too much.
    #[error("retention ratio {0} out of bounds")]
    Retention(f32),
    /// No foreground pixel left.
    #[error("empty foreground")]
    EmptyForeground,
    /// The foreground collapsed into a flat sliver.
    #[error("aspect ratio {0} too small")]
    AspectRatio(f32),
}

/// Check that the steps of a pipeline may be combined.
///
/// # Example
///
/// ```
/// use glyph_augment::orchestrator::{check_compatibility, Incompatibility};
/// use glyph_augment::AugmentationKind::*;
///
/// assert!(check_compatibility(&[HorizontalFlip, Rotate90, ShiftRight]).is_ok());
/// assert_eq!(
///     check_compatibility(&[Rotate90, Closing, SaltAndPepper]),
///     Err(Incompatibility::RotationWithMorphology)
/// );
/// ```
pub fn check_compatibility(pipeline: &[AugmentationKind]) -> Result<(), Incompatibility> {
    let has = |kind: AugmentationKind| pipeline.contains(&kind);

    if has(AugmentationKind::VerticalFlip) {
        return Err(Incompatibility::VerticalFlip);
    }

    let rotations = pipeline.iter().filter(|k| k.is_rotation()).count();
    if rotations > 1 {
        return Err(Incompatibility::MultipleRotations);
    }
    let morphology = pipeline
        .iter()
        .any(|k| k.family() == AugmentationFamily::Morphology);
    if rotations > 0 && morphology {
        return Err(Incompatibility::RotationWithMorphology);
    }

    if has(AugmentationKind::Dilate) && has(AugmentationKind::Erode) {
        return Err(Incompatibility::DilateWithErode);
    }
    if has(AugmentationKind::Boundaries) && has(AugmentationKind::Erode) {
        return Err(Incompatibility::BoundariesWithErode);
    }
    Ok(())
}

/// Ratio of positive pixels after a transform to positive pixels before it.
///
/// Returns 0 when `before` has no positive pixel.
pub fn retention_ratio(before: &Image<u8, 1>, after: &Image<u8, 1>) -> f32 {
    let count_before = before.count_nonzero();
    if count_before == 0 {
        return 0.0;
    }
    after.count_nonzero() as f32 / count_before as f32
}

/// Inclusive pixel bounds of the positive pixels of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    /// First column holding a positive pixel.
    pub x_min: usize,
    /// First row holding a positive pixel.
    pub y_min: usize,
    /// Last column holding a positive pixel.
    pub x_max: usize,
    /// Last row holding a positive pixel.
    pub y_max: usize,
}

impl BoundingBox {
    /// Number of columns spanned, bounds included.
    pub fn width(&self) -> usize {
        self.x_max - self.x_min + 1
    }

    /// Number of rows spanned, bounds included.
    pub fn height(&self) -> usize {
        self.y_max - self.y_min + 1
    }

    /// `height / (width + 1e-8)`, a single pixel giving 1.
    pub fn aspect_ratio(&self) -> f32 {
        self.height() as f32 / (self.width() as f32 + ASPECT_RATIO_EPSILON)
    }
}

/// Bounding box of the positive pixels, `None` when there are none.
pub fn bounding_box(image: &Image<u8, 1>) -> Option<BoundingBox> {
    let cols = image.cols();
    let mut bbox: Option<BoundingBox> = None;

    for (i, &v) in image.as_slice().iter().enumerate() {
        if v == 0 {
            continue;
        }
        let (x, y) = (i % cols, i / cols);
        bbox = Some(match bbox {
            None => BoundingBox {
                x_min: x,
                y_min: y,
                x_max: x,
                y_max: y,
            },
            // rows are visited in order, so only the columns can widen backwards
            Some(b) => BoundingBox {
                x_min: b.x_min.min(x),
                y_min: b.y_min,
                x_max: b.x_max.max(x),
                y_max: y,
            },
        });
    }

    bbox
}

/// An accepted image together with the steps that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedSample {
    /// The augmented image.
    pub image: Image<u8, 1>,
    /// The applied steps, in order.
    pub pipeline: Vec<AugmentationKind>,
}

impl fmt::Display for AugmentedSample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, kind) in self.pipeline.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "[{}] {}", i + 1, kind)?;
        }
        Ok(())
    }
}

/// Composes randomized augmentation pipelines and keeps the structurally valid results.
///
/// # Example
///
/// ```
/// use glyph_image::{Image, ImageSize};
/// use glyph_augment::{AugmentConfig, AugmentationOrchestrator};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut image = Image::<u8, 1>::from_size_val(ImageSize { width: 28, height: 28 }, 0).unwrap();
/// for y in 6..22 {
///     for x in 10..18 {
///         image.set_pixel(x, y, 0, 255).unwrap();
///     }
/// }
///
/// let orchestrator = AugmentationOrchestrator::new(AugmentConfig::default()).unwrap();
/// let samples = orchestrator
///     .augment(&image, Some(4), &mut StdRng::seed_from_u64(0))
///     .unwrap();
///
/// assert!(samples.len() <= 4);
/// ```
#[derive(Debug)]
pub struct AugmentationOrchestrator {
    config: AugmentConfig,
    noise: NoiseAugmentor,
}

impl AugmentationOrchestrator {
    /// Create an orchestrator with uniform noise providers over the configured ranges.
    pub fn new(config: AugmentConfig) -> Result<Self, AugmentError> {
        let noise = NoiseAugmentor::from_ranges(config.noise_std_range, config.noise_prob_range)?;
        Self::with_noise(config, noise)
    }

    /// Create an orchestrator with a custom noise augmentor.
    pub fn with_noise(config: AugmentConfig, noise: NoiseAugmentor) -> Result<Self, AugmentError> {
        config.validate()?;
        Ok(Self { config, noise })
    }

    /// The configuration of the orchestrator.
    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// Draw three distinct families in random order and one kind from each.
    pub fn sample_pipeline<R: Rng>(&self, rng: &mut R) -> Vec<AugmentationKind> {
        let mut families: Vec<&CatalogFamily> = self.config.catalog.iter().collect();
        families.shuffle(rng);
        families
            .into_iter()
            .take(PIPELINE_LENGTH)
            .filter_map(|entry| entry.kinds.choose(rng).copied())
            .collect()
    }

    /// Apply a single step.
    pub fn apply_step<R: Rng>(
        &self,
        src: &Image<u8, 1>,
        kind: AugmentationKind,
        rng: &mut R,
    ) -> Result<Image<u8, 1>, ImageError> {
        let k = self.config.morph_kernel_size;
        match kind {
            AugmentationKind::HorizontalFlip => geometric::horizontal_flip(src),
            AugmentationKind::VerticalFlip => geometric::vertical_flip(src),
            AugmentationKind::Rotate90 => geometric::rotate_90(src, true),
            AugmentationKind::RotateSmall => {
                geometric::rotate_small_angle(src, None, Some(Direction::Right), None, rng)
            }
            AugmentationKind::Dilate => morphology::dilate(src, k),
            AugmentationKind::Erode => morphology::erode(src, k, None),
            AugmentationKind::Closing => {
                morphology::morphology_filter(src, k, None, MorphFilterMode::Close)
            }
            AugmentationKind::Opening => {
                morphology::morphology_filter(src, k, None, MorphFilterMode::Open)
            }
            AugmentationKind::Boundaries => morphology::get_boundaries(src, k, None),
            AugmentationKind::SaltAndPepper => self.noise.salt_and_pepper(src, None, rng),
            AugmentationKind::GaussianNoise => self.noise.gaussian_noise(src, None, rng),
            AugmentationKind::ShiftRight => {
                geometric::random_shift(src, None, Some(Direction::Right), rng)
            }
        }
    }

    /// Apply the steps of a pipeline in order to a copy of `src`.
    pub fn apply_pipeline<R: Rng>(
        &self,
        src: &Image<u8, 1>,
        pipeline: &[AugmentationKind],
        rng: &mut R,
    ) -> Result<Image<u8, 1>, ImageError> {
        let mut image = src.clone();
        for &kind in pipeline {
            image = self.apply_step(&image, kind, rng)?;
        }
        Ok(image)
    }

    /// Check the retention ratio and the bounding box of an augmented image.
    pub fn validate_sample(
        &self,
        before: &Image<u8, 1>,
        after: &Image<u8, 1>,
    ) -> Result<(), Rejection> {
        let retention = retention_ratio(before, after);
        if !(retention > self.config.min_retention && retention < self.config.max_retention) {
            return Err(Rejection::Retention(retention));
        }

        let bbox = bounding_box(after).ok_or(Rejection::EmptyForeground)?;
        let aspect_ratio = bbox.aspect_ratio();
        if aspect_ratio < self.config.min_aspect_ratio {
            return Err(Rejection::AspectRatio(aspect_ratio));
        }
        Ok(())
    }

    /// Produce up to `repeats` augmented variants of `src`.
    ///
    /// See [`AugmentationOrchestrator::augment_traced`].
    pub fn augment<R: Rng>(
        &self,
        src: &Image<u8, 1>,
        repeats: Option<usize>,
        rng: &mut R,
    ) -> Result<Vec<Image<u8, 1>>, AugmentError> {
        Ok(self
            .augment_traced(src, repeats, rng)?
            .into_iter()
            .map(|sample| sample.image)
            .collect())
    }

    /// Produce up to `repeats` augmented variants of `src` with the pipeline of each.
    ///
    /// `repeats` is drawn from `[2, 5)` when `None`. Sampling stops after
    /// `repeats * attempts_per_sample` attempts; the accepted samples are returned even
    /// when fewer than `repeats`.
    pub fn augment_traced<R: Rng>(
        &self,
        src: &Image<u8, 1>,
        repeats: Option<usize>,
        rng: &mut R,
    ) -> Result<Vec<AugmentedSample>, AugmentError> {
        let repeats = repeats.unwrap_or_else(|| rng.random_range(2..5));
        let max_attempts = repeats * self.config.attempts_per_sample;

        let mut samples = Vec::with_capacity(repeats);
        let mut attempts = 0;

        while samples.len() < repeats && attempts < max_attempts {
            attempts += 1;

            let pipeline = self.sample_pipeline(rng);
            if let Err(reason) = check_compatibility(&pipeline) {
                log::debug!("attempt {attempts}: skipped {pipeline:?}, {reason}");
                continue;
            }

            let image = self.apply_pipeline(src, &pipeline, rng)?;
            if let Err(reason) = self.validate_sample(src, &image) {
                log::debug!("attempt {attempts}: rejected {pipeline:?}, {reason}");
                continue;
            }

            let sample = AugmentedSample { image, pipeline };
            log::debug!("attempt {attempts}: accepted {sample}");
            samples.push(sample);
        }

        if samples.len() < repeats {
            log::warn!(
                "augmentation budget exhausted: {} of {} samples after {} attempts",
                samples.len(),
                repeats,
                attempts
            );
        }

        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ConstantProvider;
    use glyph_image::ImageSize;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::step::AugmentationKind::*;

    fn block_digit() -> Result<Image<u8, 1>, ImageError> {
        let mut image = Image::from_size_val(
            ImageSize {
                width: 28,
                height: 28,
            },
            0,
        )?;
        for y in 6..22 {
            for x in 10..18 {
                image.set_pixel(x, y, 0, 255)?;
            }
        }
        Ok(image)
    }

    #[test]
    fn compatibility_rules() {
        assert_eq!(check_compatibility(&[HorizontalFlip, Dilate, ShiftRight]), Ok(()));
        assert_eq!(
            check_compatibility(&[VerticalFlip, Dilate, ShiftRight]),
            Err(Incompatibility::VerticalFlip)
        );
        assert_eq!(
            check_compatibility(&[Rotate90, RotateSmall, ShiftRight]),
            Err(Incompatibility::MultipleRotations)
        );
        assert_eq!(
            check_compatibility(&[HorizontalFlip, RotateSmall, Opening]),
            Err(Incompatibility::RotationWithMorphology)
        );
        assert_eq!(
            check_compatibility(&[Dilate, Erode]),
            Err(Incompatibility::DilateWithErode)
        );
        assert_eq!(
            check_compatibility(&[Boundaries, Erode, SaltAndPepper]),
            Err(Incompatibility::BoundariesWithErode)
        );
        assert_eq!(check_compatibility(&[]), Ok(()));
    }

    #[test]
    fn retention_and_bbox() -> Result<(), ImageError> {
        let before = Image::<u8, 1>::from_rows(&[vec![0, 9, 0], vec![0, 9, 0], vec![0, 0, 0]])?;
        let after = Image::<u8, 1>::from_rows(&[vec![0, 9, 9], vec![0, 9, 9], vec![0, 0, 0]])?;
        assert_eq!(retention_ratio(&before, &after), 2.0);

        let empty = Image::<u8, 1>::from_size_val(before.size(), 0)?;
        assert_eq!(retention_ratio(&empty, &after), 0.0);
        assert_eq!(bounding_box(&empty), None);

        let bbox = bounding_box(&after).ok_or(ImageError::ImageDataNotInitialized)?;
        assert_eq!(
            bbox,
            BoundingBox {
                x_min: 1,
                y_min: 0,
                x_max: 2,
                y_max: 1
            }
        );
        approx::assert_relative_eq!(bbox.aspect_ratio(), 1.0, epsilon = 1e-6);
        Ok(())
    }

    #[test]
    fn flat_foreground_is_rejected() -> Result<(), AugmentError> {
        let orchestrator = AugmentationOrchestrator::new(AugmentConfig::default())?;
        let before = Image::<u8, 1>::from_rows(&[
            vec![0, 9, 9, 9, 9, 9, 9, 9, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
        ])?;
        let after = before.clone();
        assert_eq!(
            orchestrator.validate_sample(&before, &after),
            Err(Rejection::AspectRatio(1.0 / 7.0))
        );
        let empty = Image::<u8, 1>::from_size_val(before.size(), 0)?;
        assert_eq!(
            orchestrator.validate_sample(&before, &empty),
            Err(Rejection::Retention(0.0))
        );
        Ok(())
    }

    #[test]
    fn bounding_box_extents_are_inclusive() -> Result<(), AugmentError> {
        let orchestrator = AugmentationOrchestrator::new(AugmentConfig::default())?;

        let dot = Image::<u8, 1>::from_rows(&[vec![0, 0, 0], vec![0, 9, 0], vec![0, 0, 0]])?;
        let bbox = bounding_box(&dot).ok_or(ImageError::ImageDataNotInitialized)?;
        assert_eq!((bbox.width(), bbox.height()), (1, 1));
        approx::assert_relative_eq!(bbox.aspect_ratio(), 1.0, epsilon = 1e-6);
        assert_eq!(orchestrator.validate_sample(&dot, &dot), Ok(()));

        let bar = Image::<u8, 1>::from_rows(&[
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
            vec![0, 9, 9, 9, 9, 9, 9, 9, 0],
            vec![0, 9, 9, 9, 9, 9, 9, 9, 0],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0],
        ])?;
        let bbox = bounding_box(&bar).ok_or(ImageError::ImageDataNotInitialized)?;
        assert_eq!((bbox.width(), bbox.height()), (7, 2));
        approx::assert_relative_eq!(bbox.aspect_ratio(), 2.0 / 7.0, epsilon = 1e-6);
        assert_eq!(orchestrator.validate_sample(&bar, &bar), Ok(()));
        Ok(())
    }

    #[test]
    fn sampled_pipelines_use_distinct_families() -> Result<(), AugmentError> {
        let orchestrator = AugmentationOrchestrator::new(AugmentConfig::default())?;
        let mut rng = StdRng::seed_from_u64(0);
        let catalog_kinds: Vec<AugmentationKind> = default_catalog()
            .into_iter()
            .flat_map(|entry| entry.kinds)
            .collect();

        for _ in 0..200 {
            let pipeline = orchestrator.sample_pipeline(&mut rng);
            assert_eq!(pipeline.len(), PIPELINE_LENGTH);
            let families: BTreeSet<AugmentationFamily> =
                pipeline.iter().map(|k| k.family()).collect();
            assert_eq!(families.len(), PIPELINE_LENGTH);
            assert!(pipeline.iter().all(|k| catalog_kinds.contains(k)));
        }
        Ok(())
    }

    #[test]
    fn augment_respects_constraints() -> Result<(), AugmentError> {
        let orchestrator = AugmentationOrchestrator::new(AugmentConfig::default())?;
        let image = block_digit()?;
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..5 {
            let samples = orchestrator.augment_traced(&image, Some(3), &mut rng)?;
            assert_eq!(samples.len(), 3);
            for sample in samples {
                assert_eq!(sample.image.size(), image.size());
                assert!(!sample.pipeline.contains(&VerticalFlip));
                assert!(check_compatibility(&sample.pipeline).is_ok());
                let r = retention_ratio(&image, &sample.image);
                assert!(r > 0.2 && r < 3.0);
            }
        }
        Ok(())
    }

    #[test]
    fn default_morphology_kernel_is_not_a_no_op() -> Result<(), AugmentError> {
        let image = block_digit()?;
        let mut rng = StdRng::seed_from_u64(0);

        let orchestrator = AugmentationOrchestrator::new(AugmentConfig::default())?;
        assert_eq!(orchestrator.config().morph_kernel_size, 2);
        let dilated = orchestrator.apply_step(&image, Dilate, &mut rng)?;
        assert!(dilated.count_nonzero() > image.count_nonzero());

        let unit = AugmentationOrchestrator::new(AugmentConfig {
            morph_kernel_size: 1,
            ..Default::default()
        })?;
        assert_eq!(unit.apply_step(&image, Dilate, &mut rng)?, image);
        assert_eq!(unit.apply_step(&image, Closing, &mut rng)?, image);
        Ok(())
    }

    #[test]
    fn augment_default_repeats() -> Result<(), AugmentError> {
        let orchestrator = AugmentationOrchestrator::new(AugmentConfig::default())?;
        let image = block_digit()?;
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..10 {
            let samples = orchestrator.augment(&image, None, &mut rng)?;
            assert!(samples.len() <= 4);
        }
        Ok(())
    }

    #[test]
    fn augment_blank_image_returns_partial_batch() -> Result<(), AugmentError> {
        let config = AugmentConfig {
            attempts_per_sample: 5,
            ..Default::default()
        };
        let orchestrator = AugmentationOrchestrator::new(config)?;
        let blank = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 8,
                height: 8,
            },
            0,
        )?;
        let samples = orchestrator.augment(&blank, Some(3), &mut StdRng::seed_from_u64(1))?;
        assert!(samples.is_empty());
        assert!(orchestrator
            .augment(&blank, Some(0), &mut StdRng::seed_from_u64(1))?
            .is_empty());
        Ok(())
    }

    #[test]
    fn augment_is_reproducible() -> Result<(), AugmentError> {
        let noise = NoiseAugmentor::new(
            Box::new(ConstantProvider(2.0)),
            Box::new(ConstantProvider(0.02)),
        );
        let orchestrator = AugmentationOrchestrator::with_noise(AugmentConfig::default(), noise)?;
        let image = block_digit()?;
        let a = orchestrator.augment_traced(&image, Some(3), &mut StdRng::seed_from_u64(5))?;
        let b = orchestrator.augment_traced(&image, Some(3), &mut StdRng::seed_from_u64(5))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn sample_display() -> Result<(), ImageError> {
        let sample = AugmentedSample {
            image: Image::from_size_val(
                ImageSize {
                    width: 1,
                    height: 1,
                },
                0,
            )?,
            pipeline: vec![HorizontalFlip, Rotate90, ShiftRight],
        };
        assert_eq!(
            sample.to_string(),
            "[1] H-Flip -> [2] Rot90-R -> [3] Shift-R"
        );
        Ok(())
    }

    #[test]
    fn invalid_catalogs() {
        let mut config = AugmentConfig::default();
        config.catalog.truncate(2);
        assert_eq!(
            AugmentationOrchestrator::new(config).err(),
            Some(AugmentError::NotEnoughFamilies(2, 3))
        );

        let mut config = AugmentConfig::default();
        config.catalog[1].kinds.clear();
        assert_eq!(
            AugmentationOrchestrator::new(config).err(),
            Some(AugmentError::EmptyFamily(AugmentationFamily::Rotation))
        );

        let mut config = AugmentConfig::default();
        config.catalog[0].kinds.push(Erode);
        assert_eq!(
            AugmentationOrchestrator::new(config).err(),
            Some(AugmentError::MisplacedKind(Erode, AugmentationFamily::Flip))
        );

        let mut config = AugmentConfig::default();
        let duplicate = config.catalog[0].clone();
        config.catalog.push(duplicate);
        assert_eq!(
            AugmentationOrchestrator::new(config).err(),
            Some(AugmentError::DuplicateFamily(AugmentationFamily::Flip))
        );

        let config = AugmentConfig {
            min_retention: 3.0,
            max_retention: 0.2,
            ..Default::default()
        };
        assert!(matches!(
            AugmentationOrchestrator::new(config),
            Err(AugmentError::InvalidBounds(_))
        ));
    }

    #[test]
    fn config_from_partial_json() -> Result<(), serde_json::Error> {
        let config: AugmentConfig =
            serde_json::from_str(r#"{ "morph_kernel_size": 3, "catalog": [
                { "family": "Flip", "kinds": ["H-Flip"] },
                { "family": "Morphology", "kinds": ["Erode", "Opening"] },
                { "family": "Noise_Shift", "kinds": ["Gauss-Noise"] }
            ] }"#)?;
        assert_eq!(config.morph_kernel_size, 3);
        assert_eq!(config.attempts_per_sample, 100);
        assert_eq!(config.catalog[1].kinds, vec![Erode, Opening]);
        assert!(config.validate().is_ok());
        Ok(())
    }
}
