use std::fmt::Debug;

use rand::{Rng, RngCore};

use crate::error::AugmentError;

/// A source of scalar augmentation parameters.
///
/// Providers hold only their configuration; the randomness comes from the caller so that
/// a seeded generator makes every draw reproducible.
pub trait ParameterProvider: Send + Sync + Debug {
    /// Draw one value.
    fn value(&self, rng: &mut dyn RngCore) -> f32;
}

/// Draws values uniformly from the closed range `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformProvider {
    low: f32,
    high: f32,
}

impl UniformProvider {
    /// Create a provider over `[low, high]`.
    ///
    /// A reversed range is swapped with a warning. Non-finite bounds are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use glyph_augment::provider::{ParameterProvider, UniformProvider};
    ///
    /// let provider = UniformProvider::new(0.1, 5.0).unwrap();
    /// let value = provider.value(&mut rand::rng());
    /// assert!((0.1..=5.0).contains(&value));
    /// ```
    pub fn new(low: f32, high: f32) -> Result<Self, AugmentError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(AugmentError::InvalidProviderRange(low, high));
        }
        if low > high {
            log::warn!("provider range [{low}, {high}] is reversed, swapping the bounds");
            return Ok(Self {
                low: high,
                high: low,
            });
        }
        Ok(Self { low, high })
    }

    /// Create a provider from a `(low, high)` pair.
    pub fn from_range(range: (f32, f32)) -> Result<Self, AugmentError> {
        Self::new(range.0, range.1)
    }

    /// The bounds of the provider.
    pub fn range(&self) -> (f32, f32) {
        (self.low, self.high)
    }
}

impl ParameterProvider for UniformProvider {
    fn value(&self, rng: &mut dyn RngCore) -> f32 {
        if self.low == self.high {
            return self.low;
        }
        rng.random_range(self.low..=self.high)
    }
}

/// Always returns the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantProvider(pub f32);

impl ParameterProvider for ConstantProvider {
    fn value(&self, _rng: &mut dyn RngCore) -> f32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn uniform_stays_in_range() -> Result<(), AugmentError> {
        let provider = UniformProvider::new(0.01, 0.05)?;
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = provider.value(&mut rng);
            assert!((0.01..=0.05).contains(&v));
        }
        Ok(())
    }

    #[test]
    fn uniform_swaps_reversed_bounds() -> Result<(), AugmentError> {
        let provider = UniformProvider::new(5.0, 0.1)?;
        assert_eq!(provider.range(), (0.1, 5.0));
        Ok(())
    }

    #[test]
    fn uniform_degenerate_range() -> Result<(), AugmentError> {
        let provider = UniformProvider::new(2.0, 2.0)?;
        assert_eq!(provider.value(&mut StdRng::seed_from_u64(0)), 2.0);
        Ok(())
    }

    #[test]
    fn uniform_rejects_nan() {
        assert!(matches!(
            UniformProvider::new(f32::NAN, 1.0),
            Err(AugmentError::InvalidProviderRange(..))
        ));
    }

    #[test]
    fn seeded_draws_repeat() -> Result<(), AugmentError> {
        let provider = UniformProvider::new(0.1, 5.0)?;
        let a = provider.value(&mut StdRng::seed_from_u64(3));
        let b = provider.value(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn constant_ignores_rng() {
        let provider = ConstantProvider(0.5);
        assert_eq!(provider.value(&mut rand::rng()), 0.5);
    }
}
