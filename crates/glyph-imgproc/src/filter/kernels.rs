use glyph_image::ImageError;

/// Create a box kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn box_blur_kernel_1d(kernel_size: usize) -> Vec<f32> {
    vec![1.0 / kernel_size as f32; kernel_size]
}

/// Create a triangular (tent) kernel of length `2 * size - 1`.
///
/// The weights are `size - |i|` for `i` in `[-size + 1, size - 1]`.
///
/// # Returns
///
/// A vector of the kernel.
pub fn tent_kernel_1d(size: usize) -> Vec<f32> {
    let n = size as isize;
    (-n + 1..n).map(|i| (n - i.abs()) as f32).collect()
}

/// A square matrix of correlation weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    data: Vec<f32>,
}

impl Kernel {
    /// Create a kernel of side `size` from its row-major weights.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero or `data` does not hold `size * size` weights.
    pub fn new(size: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        if size == 0 {
            return Err(ImageError::InvalidKernelSize(size));
        }
        if data.len() != size * size {
            return Err(ImageError::NonSquareKernel(data.len(), size));
        }
        Ok(Self { size, data })
    }

    /// Create a kernel from nested rows.
    ///
    /// ```
    /// use glyph_imgproc::filter::kernels::Kernel;
    ///
    /// let kernel = Kernel::from_rows(&[[1.0, 0.0], [0.0, -1.0]]).unwrap();
    /// assert_eq!(kernel.size(), 2);
    /// assert_eq!(kernel.get(1, 1), Some(-1.0));
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[f32; N]]) -> Result<Self, ImageError> {
        if rows.len() != N {
            return Err(ImageError::NonSquareKernel(rows.len() * N, N));
        }
        Self::new(N, rows.concat())
    }

    /// Outer product of a 1D kernel with itself.
    pub fn from_outer(kernel_1d: &[f32]) -> Result<Self, ImageError> {
        let data = kernel_1d
            .iter()
            .flat_map(|&a| kernel_1d.iter().map(move |&b| a * b))
            .collect();
        Self::new(kernel_1d.len(), data)
    }

    /// A normalized box kernel of side `size`.
    pub fn box_kernel(size: usize) -> Result<Self, ImageError> {
        Self::from_outer(&box_blur_kernel_1d(size))
    }

    /// The outer product of [`tent_kernel_1d`] with itself, of side `2 * size - 1`.
    pub fn tent(size: usize) -> Result<Self, ImageError> {
        Self::from_outer(&tent_kernel_1d(size))
    }

    /// The side of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The row-major weights.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// The weight at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.data.get(row * self.size + col).copied()
    }
}
