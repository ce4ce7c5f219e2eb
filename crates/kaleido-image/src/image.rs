use crate::error::ImageError;

/// Number of color channels of the pixels handled by the kaleidoscope pipeline.
pub const COLOR_CHANNELS: usize = 3;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use kaleido_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored row-major with `CHANNELS` interleaved samples each, so the
/// pixel at `(x, y)` starts at offset `(y * width + x) * CHANNELS`.
///
/// The image exclusively owns its samples. `encoded_len` carries the byte length of the
/// stream the image was decoded from; it is informational and never used to size the data.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
    encoded_len: usize,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use kaleido_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = Self::num_samples(size)?;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        Ok(Self {
            size,
            data,
            encoded_len: 0,
        })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// The storage is reserved fallibly, so an oversized request returns an error instead
    /// of aborting: [`ImageError::InvalidImageSize`] when the sample count overflows and
    /// [`ImageError::AllocationFailed`] when the storage cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use kaleido_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///     ImageSize {
    ///         width: 10,
    ///         height: 20,
    ///     },
    ///     0u8,
    /// ).unwrap();
    ///
    /// assert_eq!(image.as_slice().len(), 10 * 20 * 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let len = Self::num_samples(size)?;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| ImageError::AllocationFailed(len))?;
        data.resize(len, val);

        Image::new(size, data)
    }

    fn num_samples(size: ImageSize) -> Result<usize, ImageError> {
        size.width
            .checked_mul(size.height)
            .and_then(|area| area.checked_mul(CHANNELS))
            .ok_or(ImageError::InvalidImageSize(size.width, size.height))
    }

    /// Attach the byte length of the encoded stream the image came from.
    pub fn with_encoded_len(mut self, encoded_len: usize) -> Self {
        self.encoded_len = encoded_len;
        self
    }

    /// Byte length of the encoded stream the image came from, zero if unknown.
    pub fn encoded_len(&self) -> usize {
        self.encoded_len
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the image and return its pixel data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Get the samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&[T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = (y * self.width() + x) * CHANNELS;
        self.data.get(start..start + CHANNELS)
    }

    /// Get the mutable samples of the pixel at `(x, y)`.
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [T]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = (y * self.width() + x) * CHANNELS;
        self.data.get_mut(start..start + CHANNELS)
    }

    /// Get a single channel value of the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// If the coordinates or the channel are out of bounds, an error is returned.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<&T, ImageError> {
        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        self.pixel(x, y)
            .map(|px| &px[ch])
            .ok_or(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ))
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.area(), 200);
        assert!(!image_size.is_empty());
        assert!(ImageSize::from([0, 4]).is_empty());
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.encoded_len(), 0);

        Ok(())
    }

    #[test]
    fn image_invalid_shape() {
        let res = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0u8; 11],
        );
        assert_eq!(res, Err(ImageError::InvalidChannelShape(11, 12)));
    }

    #[test]
    fn image_allocation_failure() {
        let res = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: usize::MAX / 8,
                height: 2,
            },
            0u8,
        );
        assert!(matches!(res, Err(ImageError::AllocationFailed(_))));
    }

    #[test]
    fn image_size_overflow() {
        let size = ImageSize {
            width: usize::MAX / 2,
            height: 4,
        };
        assert_eq!(
            Image::<u8, 3>::from_size_val(size, 0u8),
            Err(ImageError::InvalidImageSize(usize::MAX / 2, 4))
        );
        assert_eq!(
            Image::<u8, 3>::new(size, vec![]),
            Err(ImageError::InvalidImageSize(usize::MAX / 2, 4))
        );
    }

    #[test]
    fn image_pixel_access() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let mut image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                0, 1, 2, 3, 4, 5,
                6, 7, 8, 9, 10, 11,
            ],
        )?;

        assert_eq!(image.pixel(1, 1), Some(&[9u8, 10, 11][..]));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.get_pixel(0, 1, 2)?, &8);
        assert_eq!(
            image.get_pixel(0, 0, 3),
            Err(ImageError::ChannelIndexOutOfBounds(3, 3))
        );
        assert_eq!(
            image.get_pixel(0, 5, 0),
            Err(ImageError::PixelIndexOutOfBounds(0, 5, 2, 2))
        );

        if let Some(px) = image.pixel_mut(0, 0) {
            px.copy_from_slice(&[255, 255, 255]);
        }
        assert_eq!(&image.as_slice()[..3], &[255, 255, 255]);

        Ok(())
    }

    #[test]
    fn image_encoded_len() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([3, 1].into(), 7u8)?.with_encoded_len(1234);
        assert_eq!(image.encoded_len(), 1234);
        assert_eq!(image.into_vec(), vec![7u8; 3]);
        Ok(())
    }
}
