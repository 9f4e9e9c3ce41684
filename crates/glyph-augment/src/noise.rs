use glyph_image::{ops::saturate_u8, Image, ImageError};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::AugmentError;
use crate::provider::{ParameterProvider, UniformProvider};

/// Default range of the gaussian noise standard deviation.
pub const DEFAULT_STD_RANGE: (f32, f32) = (0.1, 5.0);

/// Default range of the salt and pepper corruption probability.
pub const DEFAULT_PROB_RANGE: (f32, f32) = (0.01, 0.05);

/// Pixel noise augmentations with pluggable parameter providers.
#[derive(Debug)]
pub struct NoiseAugmentor {
    std_provider: Box<dyn ParameterProvider>,
    prob_provider: Box<dyn ParameterProvider>,
}

impl NoiseAugmentor {
    /// Create an augmentor drawing its parameters from the given providers.
    pub fn new(
        std_provider: Box<dyn ParameterProvider>,
        prob_provider: Box<dyn ParameterProvider>,
    ) -> Self {
        Self {
            std_provider,
            prob_provider,
        }
    }

    /// Create an augmentor with uniform providers over the given ranges.
    pub fn from_ranges(
        std_range: (f32, f32),
        prob_range: (f32, f32),
    ) -> Result<Self, AugmentError> {
        Ok(Self::new(
            Box::new(UniformProvider::from_range(std_range)?),
            Box::new(UniformProvider::from_range(prob_range)?),
        ))
    }

    /// Add zero-mean gaussian noise to every pixel.
    ///
    /// The noisy values are clamped to `[0, 255]` and truncated.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image.
    /// * `std` - The standard deviation, drawn from the std provider when `None`.
    /// * `rng` - The random source.
    pub fn gaussian_noise<R: Rng, const C: usize>(
        &self,
        src: &Image<u8, C>,
        std: Option<f32>,
        rng: &mut R,
    ) -> Result<Image<u8, C>, ImageError> {
        let std = match std {
            Some(std) => std,
            None => self.std_provider.value(rng),
        };
        log::debug!("gaussian_noise: std={std}");

        let data = src
            .as_slice()
            .iter()
            .map(|&v| {
                let n: f32 = rng.sample(StandardNormal);
                saturate_u8(v as f32 + std * n)
            })
            .collect();

        Image::new(src.size(), data)
    }

    /// Corrupt pixels to black or white.
    ///
    /// A uniform draw `u` per pixel sets it to 0 when `u < prob / 2` and to 255 when
    /// `u > 1 - prob / 2`.
    ///
    /// # Arguments
    ///
    /// * `src` - The source image.
    /// * `prob` - The corruption probability, drawn from the prob provider when `None`.
    /// * `rng` - The random source.
    pub fn salt_and_pepper<R: Rng, const C: usize>(
        &self,
        src: &Image<u8, C>,
        prob: Option<f32>,
        rng: &mut R,
    ) -> Result<Image<u8, C>, ImageError> {
        let prob = match prob {
            Some(prob) => prob,
            None => self.prob_provider.value(rng),
        };
        log::debug!("salt_and_pepper: prob={prob}");

        let (pepper, salt) = (prob / 2.0, 1.0 - prob / 2.0);
        let data = src
            .as_slice()
            .iter()
            .map(|&v| {
                let u: f32 = rng.random();
                if u > salt {
                    255
                } else if u < pepper {
                    0
                } else {
                    v
                }
            })
            .collect();

        Image::new(src.size(), data)
    }
}
