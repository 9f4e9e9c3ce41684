use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// Width and height of an image, in pixels.
///
/// ```
/// use glyph_image::ImageSize;
///
/// let size: ImageSize = [28, 32].into();
/// assert_eq!(size.width, 28);
/// assert_eq!(size.area(), 28 * 32);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// number of columns
    pub width: usize,
    /// number of rows
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether the size covers no pixel at all.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        Self { width, height }
    }
}

/// Owned raster with `CHANNELS` interleaved values per pixel.
///
/// Pixels are laid out row by row, so the element of row `y`, column `x` and channel `c`
/// lives at `(y * width + x) * CHANNELS + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap a flat buffer into an image.
    ///
    /// Fails with [`ImageError::InvalidChannelShape`] unless the buffer holds exactly
    /// `width * height * CHANNELS` values.
    ///
    /// ```
    /// use glyph_image::{Image, ImageSize};
    ///
    /// let size = ImageSize { width: 4, height: 2 };
    /// let rgb = Image::<u8, 3>::new(size, vec![7; 24]).unwrap();
    /// assert_eq!(rgb.num_channels(), 3);
    ///
    /// assert!(Image::<u8, 3>::new(size, vec![7; 23]).is_err());
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }
        Ok(Self { size, data })
    }

    /// Image of the given size with every element set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Self::new(size, vec![val; size.area() * CHANNELS])
    }

    /// Build an image from one vector per row.
    ///
    /// Every row must carry `width * CHANNELS` elements.
    ///
    /// ```
    /// use glyph_image::Image;
    ///
    /// let image = Image::<u8, 1>::from_rows(&[vec![1, 2], vec![3, 4]]).unwrap();
    /// assert_eq!(image.width(), 2);
    /// assert_eq!(image.as_slice(), &[1, 2, 3, 4]);
    /// ```
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let row_len = rows.first().map_or(0, Vec::len);
        let size = ImageSize {
            width: row_len / CHANNELS,
            height: if row_len == 0 { 0 } else { rows.len() },
        };
        Self::new(size, rows.concat())
    }

    /// Convert every element to `U`, failing on the first value `U` cannot represent.
    pub fn cast<U>(&self) -> Result<Image<U, CHANNELS>, ImageError>
    where
        T: num_traits::NumCast + Copy,
        U: num_traits::NumCast,
    {
        let data = self
            .data
            .iter()
            .map(|&v| {
                U::from(v).ok_or_else(|| ImageError::CastError(std::any::type_name::<U>().into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Image::new(self.size, data)
    }

    /// Copy one channel out into a single channel image.
    pub fn channel(&self, channel: usize) -> Result<Image<T, 1>, ImageError>
    where
        T: Copy,
    {
        if channel >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(channel, CHANNELS));
        }
        let data = self
            .data
            .chunks_exact(CHANNELS)
            .map(|px| px[channel])
            .collect();
        Image::new(self.size, data)
    }

    /// One single channel image per channel, in channel order.
    ///
    /// ```
    /// use glyph_image::Image;
    ///
    /// let rg = Image::<u8, 2>::from_rows(&[vec![1, 10, 2, 20]]).unwrap();
    /// let planes = rg.split_channels().unwrap();
    /// assert_eq!(planes[0].as_slice(), &[1, 2]);
    /// assert_eq!(planes[1].as_slice(), &[10, 20]);
    /// ```
    pub fn split_channels(&self) -> Result<Vec<Image<T, 1>>, ImageError>
    where
        T: Copy,
    {
        (0..CHANNELS).map(|c| self.channel(c)).collect()
    }

    /// Width and height of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Same as [`Image::width`].
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Same as [`Image::height`].
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Values stored per pixel.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Whether the image holds no element.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major view of the elements.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutable row-major view of the elements.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Give back the underlying buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Element at `[row, col, channel]`, or `None` outside the image.
    pub fn get(&self, [y, x, c]: [usize; 3]) -> Option<&T> {
        if y >= self.size.height || x >= self.size.width || c >= CHANNELS {
            return None;
        }
        self.data.get(self.offset(x, y, c))
    }

    /// Element at column `x`, row `y` and channel `ch`.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<&T, ImageError> {
        self.check_bounds(x, y, ch)?;
        Ok(&self.data[self.offset(x, y, ch)])
    }

    /// Overwrite the element at column `x`, row `y` and channel `ch`.
    pub fn set_pixel(&mut self, x: usize, y: usize, ch: usize, val: T) -> Result<(), ImageError> {
        self.check_bounds(x, y, ch)?;
        let idx = self.offset(x, y, ch);
        self.data[idx] = val;
        Ok(())
    }

    fn offset(&self, x: usize, y: usize, ch: usize) -> usize {
        (y * self.size.width + x) * CHANNELS + ch
    }

    fn check_bounds(&self, x: usize, y: usize, ch: usize) -> Result<(), ImageError> {
        let ImageSize { width, height } = self.size;
        if x >= width || y >= height {
            return Err(ImageError::PixelIndexOutOfBounds(x, y, width, height));
        }
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }
        Ok(())
    }
}

impl<const CHANNELS: usize> Image<u8, CHANNELS> {
    /// Count the elements strictly greater than zero.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v > 0).count()
    }
}
