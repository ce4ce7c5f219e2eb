use std::ops::Range;

use kaleido_image::{Image, ImageError, ImageSize, COLOR_CHANNELS};

/// A pixel copied out of the wedge, positioned relative to the image center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampledPoint {
    /// Horizontal offset from the image center, after shrinking.
    pub x: i32,
    /// Vertical offset from the image center, after shrinking.
    pub y: i32,
    /// The color of the source pixel.
    pub color: [u8; COLOR_CHANNELS],
}

/// Geometry of the triangular wedge cut out of an image.
///
/// The wedge apex sits on the center column at [`WedgeGeometry::apex_row`] and the wedge
/// opens downward with a half-angle of `(360 / n) / 2` degrees. Once the half-angle
/// reaches 90 degrees the wedge covers the full width of every row below the apex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WedgeGeometry {
    size: ImageSize,
    half_angle: f64,
    tan_half: f64,
    apex_row: usize,
    move_height: i64,
    shrink: f64,
}

impl WedgeGeometry {
    /// Compute the wedge geometry for an image of `size` split in `n` slices.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero.
    pub fn new(size: ImageSize, n: usize, shrink: f32) -> Result<Self, ImageError> {
        if n == 0 {
            return Err(ImageError::InvalidSliceCount(n));
        }

        let half_angle = 360.0 / n as f64 / 2.0;
        let tan_half = if half_angle < 90.0 {
            half_angle.to_radians().tan()
        } else {
            f64::INFINITY
        };

        let half_height = (size.height / 2) as i64;
        let apex_width = (size.width as f64 / (4.0 * tan_half)) as i64;
        let apex_row = (apex_width - half_height).unsigned_abs() as usize;

        let shrink = shrink as f64;
        let move_height = (half_height as f64 * shrink) as i64;

        Ok(Self {
            size,
            half_angle,
            tan_half,
            apex_row,
            move_height,
            shrink,
        })
    }

    /// The half-angle of the wedge in degrees.
    pub fn half_angle(&self) -> f64 {
        self.half_angle
    }

    /// The source row holding the wedge apex.
    pub fn apex_row(&self) -> usize {
        self.apex_row
    }

    /// Vertical offset re-centering the shrunk points.
    pub fn move_height(&self) -> i64 {
        self.move_height
    }

    /// Range of row indices counted from the apex.
    pub fn rows(&self) -> Range<usize> {
        0..self.size.height.saturating_sub(self.apex_row)
    }

    /// Columns covered by the wedge at row index `idx` (counted from the apex).
    pub fn row_span(&self, idx: usize) -> Range<usize> {
        let center = self.size.width / 2;
        let half_width = if self.tan_half.is_finite() {
            (idx as f64 * self.tan_half) as usize
        } else {
            self.size.width
        };

        let start = center.saturating_sub(half_width);
        let end = center.saturating_add(half_width).min(self.size.width);
        start..end
    }

    /// Center-relative position of the pixel at row index `idx` and column `col`.
    ///
    /// The position may fall outside the image; the bounds are checked per rotation when
    /// the points are stamped.
    pub fn point_position(&self, idx: usize, col: usize) -> (i32, i32) {
        let half_w = (self.size.width / 2) as f64;
        let half_h = (self.size.height / 2) as f64;

        let x = ((col as f64 - half_w) * self.shrink).round() as i64;
        let y = ((idx as f64 - half_h) * self.shrink).round() as i64 + self.move_height;
        (x as i32, y as i32)
    }

    /// Iterate the wedge pixels as `(row, col, x, y)`, with `row` and `col` the source
    /// pixel and `(x, y)` its center-relative position.
    pub fn samples(&self) -> impl Iterator<Item = (usize, usize, i32, i32)> + '_ {
        self.rows().flat_map(move |idx| {
            let row = idx + self.apex_row;
            self.row_span(idx).map(move |col| {
                let (x, y) = self.point_position(idx, col);
                (row, col, x, y)
            })
        })
    }
}

/// Copy the pixels of one triangular wedge of `src` into a list of sampled points.
///
/// The number of points is counted first and exactly that many are reserved, so the
/// returned list never reallocates while it is filled.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `n` - The number of slices of the full mosaic.
/// * `shrink` - The scale applied to the point positions.
///
/// # Errors
///
/// Returns an error if `n` is zero or the point list cannot be allocated.
///
/// # Examples
///
/// ```
/// use kaleido_image::{Image, ImageSize};
/// use kaleido_imgproc::slice::slice_triangle;
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 40, height: 40 }, 255).unwrap();
///
/// let points = slice_triangle(&image, 6, 0.5).unwrap();
///
/// assert!(!points.is_empty());
/// assert!(points.iter().all(|p| p.color == [255, 255, 255]));
/// ```
pub fn slice_triangle(
    src: &Image<u8, COLOR_CHANNELS>,
    n: usize,
    shrink: f32,
) -> Result<Vec<SampledPoint>, ImageError> {
    let geometry = WedgeGeometry::new(src.size(), n, shrink)?;

    let count = geometry.samples().count();
    let mut points = Vec::new();
    points
        .try_reserve_exact(count)
        .map_err(|_| ImageError::AllocationFailed(count))?;

    points.extend(geometry.samples().filter_map(|(row, col, x, y)| {
        let px = src.pixel(col, row)?;
        let mut color = [0u8; COLOR_CHANNELS];
        color.copy_from_slice(px);
        Some(SampledPoint { x, y, color })
    }));

    log::debug!(
        "sliced {} points, half angle {:.2}, apex row {}, move height {}",
        points.len(),
        geometry.half_angle(),
        geometry.apex_row(),
        geometry.move_height()
    );

    Ok(points)
}
