use kaleido_image::{Image, ImageError, ImageSize, COLOR_CHANNELS};

use crate::dim::{dim_background, DimTarget};
use crate::slice::{slice_triangle, SampledPoint};

/// Largest shrink factor keeping the rotated wedges inside the image.
pub const MAX_SHRINK: f32 = 0.5;

/// Parameters of the kaleidoscope transform.
///
/// # Examples
///
/// ```
/// use kaleido_image::{Image, ImageSize};
/// use kaleido_imgproc::KaleidoscopeParams;
///
/// let mut image = Image::<u8, 3>::from_size_val(ImageSize { width: 64, height: 64 }, 255).unwrap();
///
/// let params = KaleidoscopeParams {
///     slices: 8,
///     ..Default::default()
/// };
/// params.apply(&mut image).unwrap();
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KaleidoscopeParams {
    /// Number of rotated copies of the wedge.
    pub slices: usize,
    /// Brightness factor of the background.
    pub dim_factor: f32,
    /// Scale of the wedge, at most [`MAX_SHRINK`].
    pub shrink: f32,
}

impl Default for KaleidoscopeParams {
    fn default() -> Self {
        Self {
            slices: 6,
            dim_factor: 0.5,
            shrink: 0.3,
        }
    }
}

impl KaleidoscopeParams {
    /// Check the parameters without touching any image.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.slices == 0 {
            return Err(ImageError::InvalidSliceCount(self.slices));
        }

        if !self.shrink.is_finite() || self.shrink > MAX_SHRINK {
            return Err(ImageError::InvalidShrinkFactor(self.shrink, MAX_SHRINK));
        }

        if !self.dim_factor.is_finite() || self.dim_factor < 0.0 {
            return Err(ImageError::InvalidDimFactor(self.dim_factor));
        }

        Ok(())
    }

    /// Apply the kaleidoscope transform to `image` in place.
    ///
    /// The wedge is sliced from the original pixels, the image is dimmed, then the
    /// wedge is stamped once per slice, rotated by `idx * 360 / slices` degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the image is empty or the point
    /// list cannot be allocated. The image is left untouched in all those cases.
    pub fn apply(&self, image: &mut Image<u8, COLOR_CHANNELS>) -> Result<(), ImageError> {
        self.validate()?;

        if image.size().is_empty() {
            return Err(ImageError::InvalidImageSize(image.width(), image.height()));
        }

        let points = slice_triangle(image, self.slices, self.shrink)?;

        dim_background(DimTarget::InPlace(&mut *image), self.dim_factor)?;

        for idx in 0..self.slices {
            let angle = idx as f32 * 360.0 / self.slices as f32;
            stamp_wedge(image, &points, angle);
        }

        log::debug!(
            "stamped {} points {} times on a {} image",
            points.len(),
            self.slices,
            image.size()
        );

        Ok(())
    }
}

/// Apply the kaleidoscope transform to `image` in place.
///
/// # Arguments
///
/// * `image` - The image to transform.
/// * `n` - The number of slices.
/// * `dim_factor` - The brightness factor of the background.
/// * `shrink` - The scale of the wedge, at most [`MAX_SHRINK`].
///
/// # Errors
///
/// See [`KaleidoscopeParams::apply`].
///
/// # Examples
///
/// ```
/// use kaleido_image::{Image, ImageSize};
/// use kaleido_imgproc::kaleidoscope::kaleidoscope;
///
/// let mut image = Image::<u8, 3>::from_size_val(ImageSize { width: 100, height: 100 }, 255).unwrap();
///
/// kaleidoscope(&mut image, 4, 0.5, 0.3).unwrap();
///
/// // the corners only hold the dimmed background
/// assert_eq!(image.get_pixel(2, 2, 0).unwrap(), &127);
/// ```
pub fn kaleidoscope(
    image: &mut Image<u8, COLOR_CHANNELS>,
    n: usize,
    dim_factor: f32,
    shrink: f32,
) -> Result<(), ImageError> {
    KaleidoscopeParams {
        slices: n,
        dim_factor,
        shrink,
    }
    .apply(image)
}

/// Rotate the points by `angle` degrees around the center of an image of `size`.
///
/// Yields the absolute `(x, y)` position of each point strictly inside the image, in
/// point order.
pub fn rotated_positions<'a>(
    points: &'a [SampledPoint],
    angle: f32,
    size: ImageSize,
) -> impl Iterator<Item = (usize, usize, &'a SampledPoint)> + 'a {
    let (sin, cos) = angle.to_radians().sin_cos();
    let (center_x, center_y) = ((size.width / 2) as i64, (size.height / 2) as i64);
    let (width, height) = (size.width as i64, size.height as i64);

    points.iter().filter_map(move |p| {
        let (x, y) = (p.x as f32, p.y as f32);
        let new_x = (x * cos + y * sin).round() as i64 + center_x;
        let new_y = (y * cos - x * sin).round() as i64 + center_y;

        (new_x > 0 && new_x < width && new_y > 0 && new_y < height)
            .then_some((new_x as usize, new_y as usize, p))
    })
}

/// Overwrite the pixels of `image` with the points rotated by `angle` degrees.
///
/// Later points win when several land on the same pixel.
pub fn stamp_wedge(image: &mut Image<u8, COLOR_CHANNELS>, points: &[SampledPoint], angle: f32) {
    let size = image.size();
    for (x, y, p) in rotated_positions(points, angle, size) {
        if let Some(px) = image.pixel_mut(x, y) {
            px.copy_from_slice(&p.color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{kaleidoscope, rotated_positions, stamp_wedge, KaleidoscopeParams};
    use crate::slice::SampledPoint;
    use kaleido_image::{Image, ImageError, ImageSize};

    #[test]
    fn params_validation() {
        let ok = KaleidoscopeParams::default();
        assert_eq!(ok.validate(), Ok(()));

        let zero = KaleidoscopeParams { slices: 0, ..ok };
        assert_eq!(zero.validate(), Err(ImageError::InvalidSliceCount(0)));

        let shrink = KaleidoscopeParams { shrink: 0.6, ..ok };
        assert_eq!(
            shrink.validate(),
            Err(ImageError::InvalidShrinkFactor(0.6, 0.5))
        );

        let dim = KaleidoscopeParams {
            dim_factor: -1.0,
            ..ok
        };
        assert_eq!(dim.validate(), Err(ImageError::InvalidDimFactor(-1.0)));

        let nan = KaleidoscopeParams {
            shrink: f32::NAN,
            ..ok
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn rotate_quarter_turn() {
        let points = [SampledPoint {
            x: 3,
            y: 1,
            color: [1, 2, 3],
        }];
        let size = ImageSize {
            width: 10,
            height: 10,
        };

        let at = |angle| {
            rotated_positions(&points, angle, size)
                .map(|(x, y, _)| (x, y))
                .collect::<Vec<_>>()
        };
        assert_eq!(at(0.0), vec![(8, 6)]);
        assert_eq!(at(90.0), vec![(6, 2)]);
        assert_eq!(at(180.0), vec![(2, 4)]);
        assert_eq!(at(270.0), vec![(4, 8)]);
    }

    #[test]
    fn rotate_skips_border_and_outside() {
        let points = [
            SampledPoint {
                x: -5,
                y: 0,
                color: [0; 3],
            },
            SampledPoint {
                x: 0,
                y: 9,
                color: [0; 3],
            },
        ];
        let positions = rotated_positions(&points, 0.0, [10, 10].into()).count();
        assert_eq!(positions, 0);
    }

    #[test]
    fn stamp_later_points_win() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val([4, 4].into(), 0)?;
        let points = [
            SampledPoint {
                x: 1,
                y: 1,
                color: [10, 10, 10],
            },
            SampledPoint {
                x: 1,
                y: 1,
                color: [20, 20, 20],
            },
        ];
        stamp_wedge(&mut image, &points, 0.0);
        assert_eq!(image.pixel(3, 3), Some(&[20u8, 20, 20][..]));
        Ok(())
    }

    #[test]
    fn kaleidoscope_rejects_without_mutation() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::from_size_val([16, 16].into(), 200)?;
        let original = image.clone();

        assert!(kaleidoscope(&mut image, 0, 0.5, 0.3).is_err());
        assert!(kaleidoscope(&mut image, 4, 0.5, 0.51).is_err());
        assert!(kaleidoscope(&mut image, 4, -0.5, 0.3).is_err());
        assert_eq!(image, original);

        Ok(())
    }

    #[test]
    fn kaleidoscope_rejects_empty_image() -> Result<(), ImageError> {
        let mut image = Image::<u8, 3>::new([0, 5].into(), vec![])?;
        assert_eq!(
            kaleidoscope(&mut image, 4, 0.5, 0.3),
            Err(ImageError::InvalidImageSize(0, 5))
        );
        Ok(())
    }
}
