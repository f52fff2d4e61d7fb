//! Luminance extraction and tone shaping.

use std::borrow::Cow;

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::{debug, warn};

use crate::error::{HeightmapError, HeightmapResult};
use crate::heightmap::{Heightmap, min_max};
use crate::raster::RasterSample;

/// ITU-R BT.709 luma weights for R, G and B.
pub const BT709_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Floor on the normalization span, so a flat image divides safely.
const MIN_SPAN: f64 = 1e-6;

/// Output resolution and tone controls for [`extract_heightmap`].
///
/// # Example
///
/// ```
/// use mesh_heightmap::ExtractParams;
///
/// let params = ExtractParams::from_physical(120.0, 90.0, 2.0)
///     .unwrap()
///     .with_gamma(1.4)
///     .with_invert(true);
///
/// assert_eq!((params.width_px, params.height_px), (240, 180));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractParams {
    /// Output samples per row.
    pub width_px: u32,
    /// Output rows.
    pub height_px: u32,
    /// Exponent applied to normalized luminance.
    pub gamma: f64,
    /// Map bright to low heights instead of high.
    pub invert: bool,
    /// Read source rows bottom-up.
    pub flip_vertical: bool,
}

impl ExtractParams {
    /// Params for a fixed output grid with neutral tone settings.
    #[must_use]
    pub const fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            gamma: 1.0,
            invert: false,
            flip_vertical: false,
        }
    }

    /// Params for a physical panel sampled at `pixels_per_mm`.
    ///
    /// The grid is `floor(width_mm * pixels_per_mm)` by
    /// `floor(height_mm * pixels_per_mm)`.
    ///
    /// # Errors
    ///
    /// Returns [`HeightmapError::InvalidDimensions`] if either side comes out
    /// below one pixel, is not finite, or overflows `u32`.
    pub fn from_physical(width_mm: f64, height_mm: f64, pixels_per_mm: f64) -> HeightmapResult<Self> {
        let width_px = grid_side(width_mm, pixels_per_mm, "width")?;
        let height_px = grid_side(height_mm, pixels_per_mm, "height")?;
        Ok(Self::new(width_px, height_px))
    }

    /// Set the tone gamma.
    #[must_use]
    pub const fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set luminance inversion.
    #[must_use]
    pub const fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// Set vertical flip.
    #[must_use]
    pub const fn with_flip_vertical(mut self, flip: bool) -> Self {
        self.flip_vertical = flip;
        self
    }

    /// Gamma actually applied: non-finite or non-positive values mean 1.
    #[must_use]
    pub fn effective_gamma(&self) -> f64 {
        if self.gamma.is_finite() && self.gamma > 0.0 {
            self.gamma
        } else {
            1.0
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Truncation: value is range-checked against [1, u32::MAX] first
fn grid_side(length_mm: f64, pixels_per_mm: f64, axis: &str) -> HeightmapResult<u32> {
    let px = (length_mm * pixels_per_mm).floor();
    if !px.is_finite() || px < 1.0 || px > f64::from(u32::MAX) {
        return Err(HeightmapError::invalid_dimensions(format!(
            "{axis} of {length_mm} mm at {pixels_per_mm} px/mm gives {px} pixels"
        )));
    }
    Ok(px as u32)
}

/// BT.709 luminance of an RGBA sample, in `[0, 1]`.
#[must_use]
pub fn luminance(rgba: [u8; 4]) -> f64 {
    let [r, g, b, _] = rgba;
    (BT709_WEIGHTS[0] * f64::from(r) + BT709_WEIGHTS[1] * f64::from(g) + BT709_WEIGHTS[2] * f64::from(b))
        / 255.0
}

/// Build a normalized heightmap from a raster.
///
/// The raster is resampled (bilinear) to the requested grid, converted to
/// BT.709 luminance, shaped by gamma and optional inversion, then stretched
/// so the darkest sample is `0` and the brightest `1`. A raster with no
/// dynamic range yields all zeros.
///
/// # Errors
///
/// Returns [`HeightmapError::InvalidDimensions`] if the requested grid is
/// smaller than 1x1.
pub fn extract_heightmap(raster: &RasterSample, params: &ExtractParams) -> HeightmapResult<Heightmap> {
    let (width, height) = (params.width_px, params.height_px);
    if width < 1 || height < 1 {
        return Err(HeightmapError::invalid_dimensions(format!(
            "heightmap grid must be at least 1x1, got {width}x{height}"
        )));
    }

    let source: Cow<'_, RgbaImage> = if raster.width() == width && raster.height() == height {
        Cow::Borrowed(raster.as_rgba())
    } else {
        debug!(
            "Resampling {}x{} raster to {}x{}",
            raster.width(),
            raster.height(),
            width,
            height
        );
        Cow::Owned(imageops::resize(raster.as_rgba(), width, height, FilterType::Triangle))
    };

    let gamma = params.effective_gamma();
    let mut values = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let sy = if params.flip_vertical { height - 1 - y } else { y };
        for x in 0..width {
            let mut v = luminance(source.get_pixel(x, sy).0).powf(gamma);
            if params.invert {
                v = 1.0 - v;
            }
            values.push(v);
        }
    }

    normalize(&mut values);
    Heightmap::new(width as usize, height as usize, values)
}

/// Stretch values linearly so the minimum maps to 0 and the maximum to 1.
pub(crate) fn normalize(values: &mut [f64]) {
    let (lo, hi) = min_max(values);
    if !(hi - lo > 0.0) {
        warn!("Heightmap has no dynamic range; every height is zero");
    }
    let span = (hi - lo).max(MIN_SPAN);
    for v in values.iter_mut() {
        *v = (*v - lo) / span;
    }
}
