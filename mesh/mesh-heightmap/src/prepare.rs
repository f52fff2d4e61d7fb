//! Raster preparation before extraction.

use image::imageops;
use tracing::debug;

use crate::error::{HeightmapError, HeightmapResult};
use crate::raster::RasterSample;

/// ITU-R BT.601 luma weights, used for contrast measurement.
const BT601_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Crop the largest centered region whose `width / height` equals `aspect`.
///
/// Full width is kept when it fits; otherwise full height is kept and the
/// width is trimmed. Side lengths and offsets are rounded to whole pixels.
///
/// # Errors
///
/// Returns [`HeightmapError::InvalidDimensions`] if `aspect` is not a
/// positive finite number.
///
/// # Example
///
/// ```
/// use mesh_heightmap::{RasterSample, center_crop};
///
/// let raster = RasterSample::from_rgba(400, 400, vec![0; 400 * 400 * 4]).unwrap();
/// let cropped = center_crop(&raster, 4.0 / 3.0).unwrap();
/// assert_eq!((cropped.width(), cropped.height()), (400, 300));
/// ```
pub fn center_crop(raster: &RasterSample, aspect: f64) -> HeightmapResult<RasterSample> {
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(HeightmapError::invalid_dimensions(format!(
            "crop aspect must be positive, got {aspect}"
        )));
    }

    let (w, h) = (raster.width(), raster.height());
    let mut crop_w = w;
    let mut crop_h = round_px(f64::from(w) / aspect).max(1);
    if crop_h > h {
        crop_h = h;
        crop_w = round_px(f64::from(h) * aspect).clamp(1, w);
    }
    let x = round_px(f64::from(w - crop_w) / 2.0);
    let y = round_px(f64::from(h - crop_h) / 2.0);

    debug!(
        "Center crop {}x{} -> {}x{} at ({}, {})",
        w, h, crop_w, crop_h, x, y
    );
    let cropped = imageops::crop_imm(raster.as_rgba(), x, y, crop_w, crop_h).to_image();
    RasterSample::from_image(cropped)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Truncation: value is clamped to the u32 range
fn round_px(value: f64) -> u32 {
    value.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Stretch contrast so the darkest pixel maps to black and the brightest to
/// white.
///
/// Brightness is measured with BT.601 luma. Each colour channel is remapped
/// by `(c - min) / range * 255` and clamped, so saturated colours may clip.
/// Alpha is preserved. A flat image is shifted but not scaled.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn auto_enhance(raster: &RasterSample) -> RasterSample {
    let mut image = raster.as_rgba().clone();

    let (lo, hi) = image.pixels().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        let [r, g, b, _] = p.0;
        let luma = BT601_WEIGHTS[0] * f64::from(r)
            + BT601_WEIGHTS[1] * f64::from(g)
            + BT601_WEIGHTS[2] * f64::from(b);
        (lo.min(luma), hi.max(luma))
    });
    let range = if hi - lo > 0.0 { hi - lo } else { 1.0 };
    debug!("Auto enhance: luma range [{:.1}, {:.1}]", lo, hi);

    for pixel in image.pixels_mut() {
        for c in &mut pixel.0[..3] {
            *c = ((f64::from(*c) - lo) / range * 255.0).round().clamp(0.0, 255.0) as u8;
        }
    }

    RasterSample { image }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gray(w: u32, h: u32, f: impl Fn(u32, u32) -> u8) -> RasterSample {
        RasterSample::from_image(RgbaImage::from_fn(w, h, |x, y| {
            let c = f(x, y);
            Rgba([c, c, c, 200])
        }))
        .unwrap()
    }

    #[test]
    fn crop_keeps_full_width_when_possible() {
        let raster = gray(120, 200, |_, _| 0);
        let out = center_crop(&raster, 1.2).unwrap();
        assert_eq!((out.width(), out.height()), (120, 100));
    }

    #[test]
    fn crop_trims_width_for_wide_sources() {
        let raster = gray(300, 100, |x, _| if x >= 100 && x < 200 { 255 } else { 0 });
        let out = center_crop(&raster, 1.0).unwrap();
        assert_eq!((out.width(), out.height()), (100, 100));
        // The centered third is the bright band
        assert_eq!(out.pixel(0, 0)[0], 255);
        assert_eq!(out.pixel(99, 99)[0], 255);
    }

    #[test]
    fn crop_rejects_bad_aspect() {
        let raster = gray(4, 4, |_, _| 0);
        assert!(center_crop(&raster, 0.0).is_err());
        assert!(center_crop(&raster, f64::INFINITY).is_err());
    }

    #[test]
    fn enhance_stretches_to_full_range() {
        let raster = gray(3, 1, |x, _| [20u8, 71, 255][x as usize]);
        let out = auto_enhance(&raster);
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 200]);
        assert_eq!(out.pixel(1, 0)[0], 55);
        assert_eq!(out.pixel(2, 0), [255, 255, 255, 200]);
    }

    #[test]
    fn enhance_flat_image_shifts_to_black() {
        let raster = gray(2, 2, |_, _| 90);
        let out = auto_enhance(&raster);
        // Range collapses to 1, so every channel becomes (90 - 90) * 255
        assert!(out.as_rgba().pixels().all(|p| p.0 == [0, 0, 0, 200]));
    }
}
