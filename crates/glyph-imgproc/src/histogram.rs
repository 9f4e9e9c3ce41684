use glyph_image::Image;
use rayon::prelude::*;

/// Count the occurrences of every 8-bit intensity over all channels of an image.
///
/// # Example
///
/// ```
/// use glyph_image::Image;
/// use glyph_imgproc::histogram::compute_histogram;
///
/// let image = Image::<u8, 1>::from_rows(&[vec![0, 2, 2], vec![255, 2, 0]]).unwrap();
/// let histogram = compute_histogram(&image);
///
/// assert_eq!(histogram[0], 2);
/// assert_eq!(histogram[2], 3);
/// assert_eq!(histogram[255], 1);
/// ```
pub fn compute_histogram<const C: usize>(src: &Image<u8, C>) -> [usize; 256] {
    src.as_slice()
        .par_chunks(4096)
        .fold(
            || [0usize; 256],
            |mut local, chunk| {
                for &px in chunk {
                    local[px as usize] += 1;
                }
                local
            },
        )
        .reduce(
            || [0usize; 256],
            |mut a, b| {
                a.iter_mut().zip(b.iter()).for_each(|(a, b)| *a += b);
                a
            },
        )
}

/// The most frequent intensity of an image.
///
/// Ties resolve to the smallest intensity. An empty image yields 0.
pub fn dominant_value<const C: usize>(src: &Image<u8, C>) -> u8 {
    let histogram = compute_histogram(src);
    let mut best = 0;
    for (value, &count) in histogram.iter().enumerate() {
        if count > histogram[best] {
            best = value;
        }
    }
    best as u8
}
