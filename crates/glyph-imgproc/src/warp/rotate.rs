use std::f32::consts::PI;

use glyph_image::{Image, ImageError, ImageSize};

use crate::parallel;

/// Get the rotation matrix for a 2D rotation around a center point.
///
/// The rotation matrix is defined as:
///
/// | alpha  beta  tx |
/// | -beta  alpha ty |
///
/// where:
///
/// alpha = scale * cos(angle)
/// beta = scale * sin(angle)
/// tx = (1 - alpha) * center.x - beta * center.y
/// ty = beta * center.x + (1 - alpha) * center.y
///
/// Applied to a destination pixel it yields the source position of a rotation by `angle`,
/// which turns the content clockwise on screen since rows grow downward.
///
/// # Arguments
///
/// * `center` - The center point of the rotation.
/// * `angle` - The angle of rotation in degrees.
/// * `scale` - The scale factor.
///
/// # Example
///
/// ```
/// use glyph_imgproc::warp::get_rotation_matrix2d;
///
/// let m = get_rotation_matrix2d((1.0, 1.0), 0.0, 1.0);
/// assert_eq!(m, [1.0, 0.0, 0.0, -0.0, 1.0, 0.0]);
/// ```
pub fn get_rotation_matrix2d(center: (f32, f32), angle: f32, scale: f32) -> [f32; 6] {
    let angle = angle * PI / 180.0f32;
    let alpha = scale * angle.cos();
    let beta = scale * angle.sin();

    let tx = (1.0 - alpha) * center.0 - beta * center.1;
    let ty = beta * center.0 + (1.0 - alpha) * center.1;

    [alpha, beta, tx, -beta, alpha, ty]
}

/// Applies an affine transformation to a point.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    let u = m[0] * x + m[1] * y + m[2];
    let v = m[3] * x + m[4] * y + m[5];
    (u, v)
}

/// Rotate an image by a quarter turn.
///
/// The width and height of the result are swapped.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `clockwise` - The direction of the turn.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::warp::rotate_90;
///
/// let image = Image::<u8, 1>::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
///
/// assert_eq!(rotate_90(&image, true).unwrap().as_slice(), &[3, 1, 4, 2]);
/// assert_eq!(rotate_90(&image, false).unwrap().as_slice(), &[2, 4, 1, 3]);
/// ```
pub fn rotate_90<T, const C: usize>(
    src: &Image<T, C>,
    clockwise: bool,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let (rows, cols) = (src.rows(), src.cols());
    let mut dst = Image::from_size_val(
        ImageSize {
            width: rows,
            height: cols,
        },
        T::default(),
    )?;

    let src_data = src.as_slice();

    parallel::par_fill_rows(&mut dst, |y, dst_row| {
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let (sy, sx) = if clockwise {
                (rows - 1 - x, y)
            } else {
                (x, cols - 1 - y)
            };
            let offset = (sy * cols + sx) * C;
            dst_pixel.copy_from_slice(&src_data[offset..offset + C]);
        }
    });

    Ok(dst)
}

/// Rotate an image around its center `(w / 2, h / 2)` with nearest-neighbour sampling.
///
/// Every destination pixel is mapped back into the source and takes the pixel at the
/// truncated source position. Positions outside `[0, w - 1) x [0, h - 1)` keep `fill`.
/// Positive angles turn the content clockwise as displayed, negative ones counter-clockwise.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `angle` - The angle of rotation in degrees.
/// * `fill` - The value of the uncovered pixels.
pub fn rotate_nearest<T, const C: usize>(
    src: &Image<T, C>,
    angle: f32,
    fill: T,
) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Send + Sync,
{
    let mut dst = Image::from_size_val(src.size(), fill)?;

    let (w, h) = (src.cols() as f32, src.rows() as f32);
    let m = get_rotation_matrix2d((w / 2.0, h / 2.0), angle, 1.0);
    let cols = src.cols();
    let src_data = src.as_slice();

    parallel::par_fill_rows(&mut dst, |y, dst_row| {
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let (xf, yf) = transform_point(x as f32, y as f32, &m);
            if xf >= 0.0 && xf < w - 1.0 && yf >= 0.0 && yf < h - 1.0 {
                let offset = (yf as usize * cols + xf as usize) * C;
                dst_pixel.copy_from_slice(&src_data[offset..offset + C]);
            }
        }
    });

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_90_shape() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 2,
            },
            1,
        )?;
        let rotated = rotate_90(&image, true)?;
        assert_eq!(
            rotated.size(),
            ImageSize {
                width: 2,
                height: 4
            }
        );
        Ok(())
    }

    #[test]
    fn rotate_90_round_trip() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 2,
            },
            (0..6).collect(),
        )?;
        #[rustfmt::skip]
        assert_eq!(
            rotate_90(&image, true)?.as_slice(),
            &[
                3, 0,
                4, 1,
                5, 2,
            ]
        );
        let back = rotate_90(&rotate_90(&image, true)?, false)?;
        assert_eq!(back, image);
        Ok(())
    }

    #[test]
    fn rotate_zero_angle_fills_last_row_and_column() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            (1..10).collect(),
        )?;
        let rotated = rotate_nearest(&image, 0.0, 0)?;
        #[rustfmt::skip]
        assert_eq!(
            rotated.as_slice(),
            &[
                1, 2, 0,
                4, 5, 0,
                0, 0, 0,
            ]
        );
        Ok(())
    }

    #[test]
    fn rotate_keeps_center() -> Result<(), ImageError> {
        let mut image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 9,
                height: 9,
            },
            0,
        )?;
        for y in 3..6 {
            for x in 3..6 {
                image.set_pixel(x, y, 0, 255)?;
            }
        }
        for angle in [-30.0, -7.0, 12.0, 30.0] {
            let rotated = rotate_nearest(&image, angle, 0)?;
            assert_eq!(rotated.size(), image.size());
            assert_eq!(*rotated.get_pixel(4, 4, 0)?, 255);
        }
        Ok(())
    }

    fn ramp_5x5() -> Result<Image<u8, 1>, ImageError> {
        Image::new(
            ImageSize {
                width: 5,
                height: 5,
            },
            (1..=25).collect(),
        )
    }

    #[test]
    fn rotate_positive_angle_turns_clockwise() -> Result<(), ImageError> {
        // xf = (x - 2.5) cos + (y - 2.5) sin + 2.5, yf = -(x - 2.5) sin + (y - 2.5) cos + 2.5
        let rotated = rotate_nearest(&ramp_5x5()?, 30.0, 0)?;
        #[rustfmt::skip]
        assert_eq!(
            rotated.as_slice(),
            &[
                 0,  0,  1,  2,  0,
                 0,  6,  7,  3,  4,
                16, 11, 12,  8,  9,
                 0, 17, 18, 14,  0,
                 0,  0,  0, 19,  0,
            ]
        );
        Ok(())
    }

    #[test]
    fn rotate_negative_angle_turns_counter_clockwise() -> Result<(), ImageError> {
        let rotated = rotate_nearest(&ramp_5x5()?, -30.0, 0)?;
        #[rustfmt::skip]
        assert_eq!(
            rotated.as_slice(),
            &[
                 0,  0,  4,  0,  0,
                 0,  2,  3,  9,  0,
                 1,  7,  8, 14,  0,
                 6, 11, 12, 18, 19,
                 0, 16, 17,  0,  0,
            ]
        );
        Ok(())
    }

    #[test]
    fn rotate_empty() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )?;
        assert!(rotate_nearest(&image, 15.0, 3)?.is_empty());
        assert!(rotate_90(&image, true)?.is_empty());
        Ok(())
    }
}
