//! Decoded raster input.

use image::{DynamicImage, RgbaImage};

use crate::error::{HeightmapError, HeightmapResult};

/// A decoded image as a grid of RGBA8 samples.
///
/// The pipeline only reads it; decoding from encoded bytes happens outside
/// the numerical core.
///
/// # Example
///
/// ```
/// use mesh_heightmap::RasterSample;
///
/// let raster = RasterSample::from_rgba(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
/// assert_eq!(raster.pixel(1, 0), [255, 255, 255, 255]);
///
/// assert!(RasterSample::from_rgba(0, 4, Vec::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSample {
    pub(crate) image: RgbaImage,
}

impl RasterSample {
    /// Wrap a raw RGBA8 buffer of `width * height * 4` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HeightmapError::InvalidImage`] if the raster is zero-area or
    /// the buffer length does not match.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> HeightmapResult<Self> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::invalid_image(format!(
                "raster is zero-area ({width}x{height})"
            )));
        }
        let len = rgba.len();
        RgbaImage::from_raw(width, height, rgba)
            .map(|image| Self { image })
            .ok_or_else(|| {
                HeightmapError::invalid_image(format!(
                    "{width}x{height} raster needs {} bytes, got {len}",
                    u64::from(width) * u64::from(height) * 4
                ))
            })
    }

    /// Wrap an already decoded RGBA image.
    ///
    /// # Errors
    ///
    /// Returns [`HeightmapError::InvalidImage`] if the image is zero-area.
    pub fn from_image(image: RgbaImage) -> HeightmapResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(HeightmapError::invalid_image("raster is zero-area"));
        }
        Ok(Self { image })
    }

    /// Convert any decoded image to RGBA8.
    ///
    /// # Errors
    ///
    /// Returns [`HeightmapError::InvalidImage`] if the image is zero-area.
    pub fn from_dynamic(image: &DynamicImage) -> HeightmapResult<Self> {
        Self::from_image(image.to_rgba8())
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width over height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width()) / f64::from(self.height())
    }

    /// RGBA sample at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Borrow the underlying image.
    #[must_use]
    pub const fn as_rgba(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume into the underlying image.
    #[must_use]
    pub fn into_rgba(self) -> RgbaImage {
        self.image
    }
}
