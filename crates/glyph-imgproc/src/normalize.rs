use glyph_image::{Image, ImageError};
use serde::{Deserialize, Serialize};

use crate::parallel;

/// Added to the standard deviation by [`z_score_normalization`].
pub const Z_SCORE_EPSILON: f32 = 1e-8;

/// The rescaling applied by [`process`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMode {
    /// Standardize to zero mean and unit variance.
    ZScore,
    /// Map `old_range` affinely onto `new_range`.
    MinMax {
        /// The source interval.
        old_range: (f32, f32),
        /// The target interval.
        new_range: (f32, f32),
    },
}

impl Default for NormalizationMode {
    fn default() -> Self {
        NormalizationMode::MinMax {
            old_range: (0.0, 255.0),
            new_range: (0.0, 1.0),
        }
    }
}

/// Find the minimum and maximum values in an image.
///
/// # Arguments
///
/// * `image` - The input image.
///
/// # Returns
///
/// A tuple containing the minimum and maximum values over all channels.
///
/// # Errors
///
/// Returns an error if the image is empty.
///
/// # Example
///
/// ```
/// use glyph_image::{Image, ImageSize};
/// use glyph_imgproc::normalize::find_min_max;
///
/// let image = Image::<u8, 3>::new(
///    ImageSize {
///       width: 2,
///       height: 2,
///   },
///   vec![0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
/// )
/// .unwrap();
///
/// let (min, max) = find_min_max(&image).unwrap();
/// assert_eq!(min, 0);
/// assert_eq!(max, 11);
/// ```
pub fn find_min_max<T, const C: usize>(image: &Image<T, C>) -> Result<(T, T), ImageError>
where
    T: Copy + PartialOrd,
{
    let first = match image.as_slice().first() {
        Some(&x) => x,
        None => return Err(ImageError::ImageDataNotInitialized),
    };

    let (min, max) = image
        .as_slice()
        .iter()
        .fold((first, first), |(min, max), &x| {
            (
                if x < min { x } else { min },
                if x > max { x } else { max },
            )
        });

    Ok((min, max))
}

/// The mean and the population standard deviation over all values of an image.
///
/// An empty image yields `(0.0, 0.0)`.
pub fn mean_std<const C: usize>(image: &Image<f32, C>) -> (f32, f32) {
    let data = image.as_slice();
    if data.is_empty() {
        return (0.0, 0.0);
    }

    let n = data.len() as f64;
    let mean = data.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var = data
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    (mean as f32, var.sqrt() as f32)
}

fn check_size<const C: usize>(src: &Image<f32, C>, dst: &Image<f32, C>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }
    Ok(())
}

/// Map the values of an image from `old_range` onto `new_range`.
///
/// `v' = (v - old.0) * (new.1 - new.0) / (old.1 - old.0) + new.0`. A zero-width `old_range`
/// maps every value to `new_range.0`.
///
/// # Example
///
/// ```
/// use glyph_image::{Image, ImageSize};
/// use glyph_imgproc::normalize::normalize;
///
/// let image = Image::<f32, 1>::from_rows(&[vec![0.0, 127.5, 255.0]]).unwrap();
/// let mut normalized = Image::<f32, 1>::from_size_val(image.size(), 0.0).unwrap();
///
/// normalize(&image, &mut normalized, (0.0, 255.0), (0.0, 1.0)).unwrap();
/// assert_eq!(normalized.as_slice(), &[0.0, 0.5, 1.0]);
/// ```
pub fn normalize<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    old_range: (f32, f32),
    new_range: (f32, f32),
) -> Result<(), ImageError> {
    check_size(src, dst)?;

    let denominator = old_range.1 - old_range.0;
    if denominator == 0.0 {
        dst.as_slice_mut().fill(new_range.0);
        return Ok(());
    }

    let scale = new_range.1 - new_range.0;
    parallel::par_iter_rows_val(src, dst, |&v, out| {
        *out = (v - old_range.0) * scale / denominator + new_range.0;
    });

    Ok(())
}

/// Standardize an image: `(v - mean) / (std + 1e-8)` with the population standard deviation.
pub fn z_score_normalization<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
) -> Result<(), ImageError> {
    check_size(src, dst)?;

    let (mean, std) = mean_std(src);
    let denominator = std + Z_SCORE_EPSILON;

    parallel::par_iter_rows_val(src, dst, |&v, out| {
        *out = (v - mean) / denominator;
    });

    Ok(())
}

/// Convert an image to `f32` and rescale it according to `mode`.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::normalize::{process, NormalizationMode};
///
/// let image = Image::<u8, 1>::from_rows(&[vec![0, 255]]).unwrap();
///
/// let scaled = process(&image, NormalizationMode::default()).unwrap();
/// assert_eq!(scaled.as_slice(), &[0.0, 1.0]);
///
/// let standardized = process(&image, NormalizationMode::ZScore).unwrap();
/// assert!((standardized.as_slice()[0] + 1.0).abs() < 1e-5);
/// ```
pub fn process<T, const C: usize>(
    src: &Image<T, C>,
    mode: NormalizationMode,
) -> Result<Image<f32, C>, ImageError>
where
    T: Copy + num_traits::NumCast,
{
    let src = src.cast::<f32>()?;
    let mut dst = Image::from_size_val(src.size(), 0.0)?;

    match mode {
        NormalizationMode::ZScore => z_score_normalization(&src, &mut dst)?,
        NormalizationMode::MinMax {
            old_range,
            new_range,
        } => normalize(&src, &mut dst, old_range, new_range)?,
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glyph_image::ImageSize;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn zero_width_range() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            1.0,
        )?;
        let mut dst = Image::from_size_val(image.size(), 5.0)?;
        normalize(&image, &mut dst, (10.0, 10.0), (0.0, 1.0))?;
        assert_eq!(dst.as_slice(), &[0.0; 6]);
        Ok(())
    }

    #[test]
    fn normalize_round_trip() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(11);
        let size = ImageSize {
            width: 7,
            height: 5,
        };
        let data = (0..size.area())
            .map(|_| rng.random_range(0.0..255.0))
            .collect();
        let image = Image::<f32, 1>::new(size, data)?;

        let mut forward = Image::from_size_val(size, 0.0)?;
        let mut back = Image::from_size_val(size, 0.0)?;
        normalize(&image, &mut forward, (0.0, 255.0), (-1.0, 1.0))?;
        normalize(&forward, &mut back, (-1.0, 1.0), (0.0, 255.0))?;

        for (a, b) in image.as_slice().iter().zip(back.as_slice()) {
            assert_relative_eq!(a, b, epsilon = 1e-3);
        }
        Ok(())
    }

    #[test]
    fn z_score_statistics() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![0, 10, 20], vec![30, 40, 250]])?;
        let standardized = process(&image, NormalizationMode::ZScore)?;

        let (mean, std) = mean_std(&standardized);
        assert_relative_eq!(mean, 0.0, epsilon = 1e-5);
        assert_relative_eq!(std, 1.0, epsilon = 1e-5);
        Ok(())
    }

    #[test]
    fn z_score_constant_image() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_rows(&[vec![9, 9], vec![9, 9]])?;
        let standardized = process(&image, NormalizationMode::ZScore)?;
        assert_eq!(standardized.as_slice(), &[0.0; 4]);
        Ok(())
    }

    #[test]
    fn population_std() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_rows(&[vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]])?;
        assert_eq!(mean_std(&image), (5.0, 2.0));
        Ok(())
    }

    #[test]
    fn min_max_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )?;
        assert_eq!(
            find_min_max(&image),
            Err(ImageError::ImageDataNotInitialized)
        );
        Ok(())
    }

    #[test]
    fn default_mode() {
        assert_eq!(
            NormalizationMode::default(),
            NormalizationMode::MinMax {
                old_range: (0.0, 255.0),
                new_range: (0.0, 1.0)
            }
        );
    }
}
