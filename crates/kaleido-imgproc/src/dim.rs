use kaleido_image::{Image, ImageError};

/// Where the dimmed pixels are written.
pub enum DimTarget<'a, const C: usize> {
    /// Overwrite the samples of the given image.
    InPlace(&'a mut Image<u8, C>),
    /// Read the given image and write into a freshly allocated one.
    IntoNew(&'a Image<u8, C>),
}

/// Scale a sample by `factor`, truncating toward zero.
///
/// NOTE: the product is not clamped. It is truncated to `u32` first, so products up to
/// `u32::MAX` wrap modulo 256 while larger ones saturate to `u32::MAX` and yield 255.
#[inline]
fn scale_sample(value: u8, factor: f32) -> u8 {
    (value as f32 * factor) as u32 as u8
}

/// Darken an image by multiplying every channel of every pixel with `factor`.
///
/// dst(x,y,c) = src(x,y,c) * factor
///
/// # Arguments
///
/// * `target` - The image to dim, in place or into a new image.
/// * `factor` - The brightness factor, expected to be non-negative.
///
/// # Returns
///
/// `None` when dimming in place, otherwise the new image carrying the size and the
/// encoded length of the source.
///
/// # Errors
///
/// Returns an error if `factor` is negative or not finite, or if the new image cannot
/// be allocated.
///
/// # Examples
///
/// ```
/// use kaleido_image::{Image, ImageSize};
/// use kaleido_imgproc::dim::{dim_background, DimTarget};
///
/// let src = Image::<u8, 3>::from_size_val(ImageSize { width: 2, height: 1 }, 200).unwrap();
///
/// let dimmed = dim_background(DimTarget::IntoNew(&src), 0.5).unwrap().unwrap();
///
/// assert_eq!(dimmed.as_slice(), &[100u8; 6]);
/// assert_eq!(src.as_slice(), &[200u8; 6]);
/// ```
pub fn dim_background<const C: usize>(
    target: DimTarget<'_, C>,
    factor: f32,
) -> Result<Option<Image<u8, C>>, ImageError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(ImageError::InvalidDimFactor(factor));
    }

    match target {
        DimTarget::InPlace(image) => {
            image
                .as_slice_mut()
                .iter_mut()
                .for_each(|v| *v = scale_sample(*v, factor));
            Ok(None)
        }
        DimTarget::IntoNew(src) => {
            let len = src.as_slice().len();
            let mut data = Vec::new();
            data.try_reserve_exact(len)
                .map_err(|_| ImageError::AllocationFailed(len))?;
            data.extend(src.as_slice().iter().map(|&v| scale_sample(v, factor)));

            let dst = Image::new(src.size(), data)?.with_encoded_len(src.encoded_len());
            Ok(Some(dst))
        }
    }
}
