//! Normalized scalar grid.

use image::{GrayImage, Luma};

use crate::error::{HeightmapError, HeightmapResult};

/// A row-major grid of heights, one per output pixel.
///
/// Heights produced by [`extract_heightmap`](crate::extract_heightmap) span
/// exactly `[0, 1]`, or are all `0` for a source with no dynamic range.
/// Larger values mean brighter source pixels.
///
/// # Example
///
/// ```
/// use mesh_heightmap::Heightmap;
///
/// let hm = Heightmap::new(2, 2, vec![0.0, 0.25, 0.5, 1.0]).unwrap();
/// assert_eq!(hm.get(1, 1), Some(1.0));
/// assert_eq!(hm.get(2, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) values: Vec<f64>,
}

impl Heightmap {
    /// Wrap `values` as a `width x height` grid.
    ///
    /// # Errors
    ///
    /// - [`HeightmapError::InvalidDimensions`] if either side is zero
    /// - [`HeightmapError::SizeMismatch`] if `values.len() != width * height`
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> HeightmapResult<Self> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::invalid_dimensions(format!(
                "heightmap grid must be at least 1x1, got {width}x{height}"
            )));
        }
        let expected = width * height;
        if values.len() != expected {
            return Err(HeightmapError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// A grid where every sample equals `value`.
    ///
    /// # Errors
    ///
    /// Returns [`HeightmapError::InvalidDimensions`] if either side is zero.
    pub fn filled(width: usize, height: usize, value: f64) -> HeightmapResult<Self> {
        Self::new(width, height, vec![value; width * height])
    }

    /// Samples per row.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total sample count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed heightmap; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row-major samples.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume into the row-major samples.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Sample at column `x`, row `y`.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.width && y < self.height {
            Some(self.values[y * self.width + x])
        } else {
            None
        }
    }

    /// Smallest and largest sample.
    #[must_use]
    pub fn min_max(&self) -> (f64, f64) {
        min_max(&self.values)
    }

    /// Grayscale preview where thick (dark) regions render light.
    ///
    /// Each pixel is `round((1 - h) * 255)`, so the image shows material
    /// thickness rather than source brightness.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation: value is clamped to [0, 255]; grid sides fit u32 because they came from one
    pub fn to_preview_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            let h = self.values[y as usize * self.width + x as usize];
            Luma([((1.0 - h) * 255.0).round().clamp(0.0, 255.0) as u8])
        })
    }
}

/// Smallest and largest value of a slice, `(INF, -INF)` when empty.
pub(crate) fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}
