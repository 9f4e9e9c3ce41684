use glyph_image::{Image, ImageError, ImageSize};

use super::kernels::Kernel;
use crate::{padding, parallel};

/// Fill value used around each channel by [`apply_filters`].
pub const FILTER_PAD_VALUE: f32 = -1.0;

/// Size of the valid-mode output of a `kernel_size` kernel over an image of `size`.
pub fn valid_output_size(size: ImageSize, kernel_size: usize) -> ImageSize {
    if size.is_empty() {
        return ImageSize {
            width: 0,
            height: 0,
        };
    }
    ImageSize {
        width: (size.width + 1).saturating_sub(kernel_size),
        height: (size.height + 1).saturating_sub(kernel_size),
    }
}

/// Slide `kernel` over `src` without padding and store the dot product of each window.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `kernel` - The correlation weights.
/// * `dst` - The destination image, of size [`valid_output_size`].
///
/// # Errors
///
/// Returns an error if the destination has the wrong size.
pub fn correlate_2d(
    src: &Image<f32, 1>,
    kernel: &Kernel,
    dst: &mut Image<f32, 1>,
) -> Result<(), ImageError> {
    let expected = valid_output_size(src.size(), kernel.size());
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            expected.width,
            expected.height,
        ));
    }

    let k = kernel.size();
    let weights = kernel.as_slice();
    let src_cols = src.cols();
    let src_data = src.as_slice();

    parallel::par_fill_rows(dst, |y, dst_row| {
        for (x, out) in dst_row.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (ky, kernel_row) in weights.chunks_exact(k).enumerate() {
                let row = &src_data[(y + ky) * src_cols + x..][..k];
                acc += kernel_row
                    .iter()
                    .zip(row.iter())
                    .map(|(w, v)| w * v)
                    .sum::<f32>();
            }
            *out = acc;
        }
    });

    Ok(())
}

/// Correlate a single channel matrix with each of the given kernels.
///
/// Each result has size `(h - k + 1) x (w - k + 1)` and is empty when the kernel does not
/// fit. Without kernels the input is returned unchanged as the only element.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::filter::{convolution_2d, kernels::Kernel};
///
/// let image = Image::<f32, 1>::from_rows(&[
///     vec![1.0, 2.0, 3.0],
///     vec![4.0, 5.0, 6.0],
/// ]).unwrap();
/// let kernel = Kernel::from_rows(&[[1.0, 0.0], [0.0, 1.0]]).unwrap();
///
/// let results = convolution_2d(&image, &[kernel]).unwrap();
///
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].as_slice(), &[6.0, 8.0]);
/// ```
pub fn convolution_2d(
    src: &Image<f32, 1>,
    kernels: &[Kernel],
) -> Result<Vec<Image<f32, 1>>, ImageError> {
    if kernels.is_empty() {
        return Ok(vec![src.clone()]);
    }

    kernels
        .iter()
        .map(|kernel| {
            let mut dst =
                Image::from_size_val(valid_output_size(src.size(), kernel.size()), 0.0)?;
            correlate_2d(src, kernel, &mut dst)?;
            Ok(dst)
        })
        .collect()
}

/// Apply every kernel to every channel.
///
/// Each channel is padded by one pixel of [`FILTER_PAD_VALUE`] before correlating. The
/// results are ordered kernel-major: all channels for the first kernel, then all channels
/// for the second one, and so on.
pub fn apply_filters(
    channels: &[Image<f32, 1>],
    kernels: &[Kernel],
) -> Result<Vec<Image<f32, 1>>, ImageError> {
    let padded = channels
        .iter()
        .map(|channel| padding::pad(channel, 1, FILTER_PAD_VALUE))
        .collect::<Result<Vec<_>, _>>()?;

    let mut results = Vec::with_capacity(kernels.len() * channels.len());
    for kernel in kernels {
        for channel in padded.iter() {
            results.extend(convolution_2d(channel, std::slice::from_ref(kernel))?);
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convolution_without_kernels() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_rows(&[vec![1.0, 2.0]])?;
        let results = convolution_2d(&image, &[])?;
        assert_eq!(results, vec![image]);
        Ok(())
    }

    #[test]
    fn convolution_valid_mode() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_rows(&[
            vec![1.0, 2.0, 3.0, 4.0],
            vec![5.0, 6.0, 7.0, 8.0],
            vec![9.0, 10.0, 11.0, 12.0],
        ])?;
        let kernel = Kernel::new(3, vec![1.0; 9])?;
        let results = convolution_2d(&image, &[kernel])?;

        assert_eq!(
            results[0].size(),
            ImageSize {
                width: 2,
                height: 1
            }
        );
        assert_eq!(results[0].as_slice(), &[54.0, 63.0]);
        Ok(())
    }

    #[test]
    fn convolution_kernel_larger_than_input() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]])?;
        let results = convolution_2d(&image, &[Kernel::box_kernel(3)?])?;
        assert!(results[0].is_empty());
        Ok(())
    }

    #[test]
    fn apply_filters_order_and_padding() -> Result<(), ImageError> {
        let a = Image::<f32, 1>::from_rows(&[vec![1.0]])?;
        let b = Image::<f32, 1>::from_rows(&[vec![2.0]])?;
        let identity = Kernel::from_rows(&[[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]])?;
        let sum = Kernel::new(3, vec![1.0; 9])?;

        let results = apply_filters(&[a, b], &[identity, sum])?;

        let values: Vec<f32> = results.iter().map(|r| r.as_slice()[0]).collect();
        // eight border pixels of -1 around the single pixel
        assert_eq!(values, vec![1.0, 2.0, -7.0, -6.0]);
        Ok(())
    }
}
