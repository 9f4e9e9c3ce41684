use rayon::prelude::*;

use glyph_image::Image;

/// Visit `src` and `dst` pixel by pixel with one rayon task per row.
///
/// The closure sees the `C1` values of a source pixel next to the `C2` values of the
/// destination pixel at the same position. Both images must share the same size.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    let width = src.cols();
    if src.is_empty() {
        return;
    }

    let rows_in = src.as_slice().par_chunks_exact(width * C1);
    let rows_out = dst.as_slice_mut().par_chunks_exact_mut(width * C2);
    rows_in.zip(rows_out).for_each(|(row_in, row_out)| {
        for (px_in, px_out) in row_in.chunks_exact(C1).zip(row_out.chunks_exact_mut(C2)) {
            f(px_in, px_out);
        }
    });
}

/// Element-wise counterpart of [`par_iter_rows`], for images with matching channel counts.
pub fn par_iter_rows_val<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
{
    let width = src.cols();
    if src.is_empty() {
        return;
    }

    let rows_in = src.as_slice().par_chunks_exact(width * C1);
    let rows_out = dst.as_slice_mut().par_chunks_exact_mut(width * C2);
    rows_in.zip(rows_out).for_each(|(row_in, row_out)| {
        row_in.iter().zip(row_out).for_each(|(v, out)| f(v, out));
    });
}

/// Element-wise combination of two sources into `dst`.
pub fn par_iter_rows_val_two<T1, const C1: usize, T2, const C2: usize, T3, const C3: usize>(
    lhs: &Image<T1, C1>,
    rhs: &Image<T2, C2>,
    dst: &mut Image<T3, C3>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Clone + Send + Sync,
    T2: Clone + Send + Sync,
    T3: Clone + Send + Sync,
{
    let width = lhs.cols();
    if lhs.is_empty() {
        return;
    }

    let rows_lhs = lhs.as_slice().par_chunks_exact(width * C1);
    let rows_rhs = rhs.as_slice().par_chunks_exact(width * C2);
    let rows_out = dst.as_slice_mut().par_chunks_exact_mut(width * C3);
    rows_lhs
        .zip(rows_rhs)
        .zip(rows_out)
        .for_each(|((row_a, row_b), row_out)| {
            for ((a, b), out) in row_a.iter().zip(row_b).zip(row_out) {
                f(a, b, out);
            }
        });
}

/// Compute every row of `dst` in parallel from its row index.
///
/// The closure receives the row index and the `width * C` values of that row.
pub fn par_fill_rows<T, const C: usize>(
    dst: &mut Image<T, C>,
    f: impl Fn(usize, &mut [T]) + Send + Sync,
) where
    T: Clone + Send + Sync,
{
    let stride = dst.cols() * C;
    if dst.is_empty() {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

#[cfg(test)]
mod tests {
    use glyph_image::{Image, ImageError};

    #[test]
    fn empty_images_are_skipped() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new([0, 3].into(), vec![])?;
        let mut dst = Image::<u8, 1>::new([0, 3].into(), vec![])?;
        super::par_iter_rows_val(&src, &mut dst, |s, d| *d = *s);
        assert!(dst.is_empty());
        Ok(())
    }

    #[test]
    fn pixels_are_paired_by_position() -> Result<(), ImageError> {
        let src = Image::<u8, 2>::from_rows(&[vec![1, 2, 3, 4], vec![5, 6, 7, 8]])?;
        let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0)?;
        super::par_iter_rows(&src, &mut dst, |px, out| out[0] = px[0] + px[1]);
        assert_eq!(dst.as_slice(), &[3, 7, 11, 15]);
        Ok(())
    }

    #[test]
    fn two_sources_are_combined() -> Result<(), ImageError> {
        let a = Image::<u8, 1>::from_rows(&[vec![1, 2], vec![3, 4]])?;
        let b = Image::<u8, 1>::from_rows(&[vec![10, 20], vec![30, 40]])?;
        let mut sum = Image::<u8, 1>::from_size_val(a.size(), 0)?;
        super::par_iter_rows_val_two(&a, &b, &mut sum, |x, y, out| *out = x + y);
        assert_eq!(sum.as_slice(), &[11, 22, 33, 44]);
        Ok(())
    }

    #[test]
    fn rows_are_filled_by_index() -> Result<(), ImageError> {
        let mut dst = Image::<usize, 1>::from_size_val([2, 3].into(), 0)?;
        super::par_fill_rows(&mut dst, |y, row| row.fill(y));
        assert_eq!(dst.as_slice(), &[0, 0, 1, 1, 2, 2]);
        Ok(())
    }
}
