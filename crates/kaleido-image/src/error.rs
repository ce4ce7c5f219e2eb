/// An error type for the image and processing modules.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image size is not valid for the operation.
    #[error("Invalid image size ({0}x{1})")]
    InvalidImageSize(usize, usize),

    /// Error when the pixel coordinates are out of bounds.
    #[error("Pixel coordinates ({0}, {1}) are out of bounds ({2}x{3})")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when the backing storage cannot be reserved.
    #[error("Failed to allocate storage for {0} elements")]
    AllocationFailed(usize),

    /// Error when the slice count is not valid.
    #[error("Invalid slice count ({0}), expected a value greater than zero")]
    InvalidSliceCount(usize),

    /// Error when the shrink factor is not valid.
    #[error("Invalid shrink factor ({0}), expected a finite value not above {1}")]
    InvalidShrinkFactor(f32, f32),

    /// Error when the dim factor is not valid.
    #[error("Invalid dim factor ({0}), expected a finite non-negative value")]
    InvalidDimFactor(f32),
}
