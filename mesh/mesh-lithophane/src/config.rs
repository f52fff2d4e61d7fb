//! Build configuration: panel, border and shape.
//!
//! All three are plain values with defaults taken from common lithophane
//! print settings. Out-of-range values are clamped when a build reads them,
//! never rejected.

use mesh_heightmap::ExtractParams;
use tracing::debug;

use crate::error::BuildResult;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Thinnest printable relief, in mm.
const MIN_THICKNESS_FLOOR_MM: f64 = 0.1;

/// Minimum gap between thinnest and thickest relief, in mm.
const MIN_RELIEF_MM: f64 = 0.2;

/// Default wrap radius for the curved shapes, in mm.
pub const DEFAULT_RADIUS_MM: f64 = 60.0;

/// Default arc for the partial cylinder shapes, in degrees.
pub const DEFAULT_ARC_DEGREES: f64 = 180.0;

/// Default exponent for [`ShapeSpec::CustomCurve`].
pub const DEFAULT_CURVE_STRENGTH: f64 = 1.5;

/// Smallest accepted wrap radius, in mm.
const MIN_RADIUS_MM: f64 = 1.0;

/// Physical panel and image-to-height mapping.
///
/// # Example
///
/// ```
/// use mesh_lithophane::PanelSpec;
///
/// let panel = PanelSpec::new(100.0, 75.0)
///     .with_pixels_per_mm(3.0)
///     .with_thickness(0.6, 2.8)
///     .with_blur_radius(1);
///
/// let params = panel.extract_params().unwrap();
/// assert_eq!((params.width_px, params.height_px), (300, 225));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelSpec {
    /// Panel width along X, in mm.
    pub width_mm: f64,
    /// Panel height along Y, in mm.
    pub height_mm: f64,
    /// Heightmap samples per mm on both axes.
    pub pixels_per_mm: f64,
    /// Tone exponent applied to luminance.
    pub gamma: f64,
    /// Make bright pixels thick instead of thin.
    pub invert: bool,
    /// Read the image bottom-up.
    pub flip_vertical: bool,
    /// Box blur radius in heightmap samples; 0 disables smoothing.
    pub blur_radius_px: usize,
    /// Relief thickness where the image is brightest, in mm.
    pub min_thickness_mm: f64,
    /// Relief thickness where the image is darkest, in mm.
    pub max_thickness_mm: f64,
}

impl Default for PanelSpec {
    fn default() -> Self {
        Self {
            width_mm: 120.0,
            height_mm: 90.0,
            pixels_per_mm: 2.0,
            gamma: 1.0,
            invert: false,
            flip_vertical: false,
            blur_radius_px: 0,
            min_thickness_mm: 0.8,
            max_thickness_mm: 3.2,
        }
    }
}

impl PanelSpec {
    /// A panel of the given size with default sampling and thickness.
    #[must_use]
    pub fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            ..Self::default()
        }
    }

    /// Set sampling density.
    #[must_use]
    pub const fn with_pixels_per_mm(mut self, pixels_per_mm: f64) -> Self {
        self.pixels_per_mm = pixels_per_mm;
        self
    }

    /// Set tone gamma.
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

    /// Set blur radius in samples.
    #[must_use]
    pub const fn with_blur_radius(mut self, radius_px: usize) -> Self {
        self.blur_radius_px = radius_px;
        self
    }

    /// Set the thinnest and thickest relief in mm.
    #[must_use]
    pub const fn with_thickness(mut self, min_mm: f64, max_mm: f64) -> Self {
        self.min_thickness_mm = min_mm;
        self.max_thickness_mm = max_mm;
        self
    }

    /// Thickness range actually used by a build.
    ///
    /// `min` is at least 0.1 mm and `max` at least `min + 0.2` mm. Non-finite
    /// inputs fall back to the defaults.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn thickness_range(&self) -> (f64, f64) {
        let defaults = Self::default();
        let min_in = finite_or(self.min_thickness_mm, defaults.min_thickness_mm);
        let min = min_in.max(MIN_THICKNESS_FLOOR_MM);
        let max_in = finite_or(self.max_thickness_mm, defaults.max_thickness_mm);
        let max = max_in.max(min + MIN_RELIEF_MM);

        if min != self.min_thickness_mm || max != self.max_thickness_mm {
            debug!(
                "Thickness {}..{} mm clamped to {}..{} mm",
                self.min_thickness_mm, self.max_thickness_mm, min, max
            );
        }
        (min, max)
    }

    /// Heightmap extraction parameters for this panel.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidDimensions`](crate::BuildError::InvalidDimensions)
    /// if the sampled grid is smaller than one pixel on either axis.
    pub fn extract_params(&self) -> BuildResult<ExtractParams> {
        let params = ExtractParams::from_physical(self.width_mm, self.height_mm, self.pixels_per_mm)?
            .with_gamma(self.gamma)
            .with_invert(self.invert)
            .with_flip_vertical(self.flip_vertical);
        Ok(params)
    }
}

/// Flat frame around the panel.
///
/// Applied only when both dimensions are positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BorderSpec {
    /// Frame band width on every side, in mm.
    pub width_mm: f64,
    /// Frame depth along Z, in mm.
    pub height_mm: f64,
}

impl BorderSpec {
    /// A frame with the given band width and depth.
    #[must_use]
    pub const fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// No frame.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Whether a frame will be built.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        [self.width_mm, self.height_mm]
            .iter()
            .all(|&mm| mm.is_finite() && mm > 0.0)
    }
}

/// Physical form of the finished lithophane.
///
/// Exactly one variant applies per build.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "kebab-case"))]
pub enum ShapeSpec {
    /// Flat panel.
    #[default]
    Flat,
    /// Full wrap into a closed cylinder.
    Cylinder {
        /// Wrap radius in mm.
        radius_mm: f64,
    },
    /// Partial cylinder spanning `arc_degrees` (clamped to 36..=360).
    ArcCylinder {
        /// Wrap radius in mm.
        radius_mm: f64,
        /// Arc covered by the panel width, in degrees.
        arc_degrees: f64,
    },
    /// Self-standing arc spanning `arc_degrees` (clamped to 72..=288).
    StandArc {
        /// Wrap radius in mm.
        radius_mm: f64,
        /// Arc covered by the panel width, in degrees.
        arc_degrees: f64,
    },
    /// Spherical cap generated directly from the heightmap.
    Dome,
    /// Sinusoidal ripple along X.
    Wave {
        /// Peak Z displacement in mm.
        amplitude_mm: f64,
    },
    /// Symmetric power-curve bow along X.
    CustomCurve {
        /// Curve exponent; higher values flatten the center.
        strength: f64,
    },
    /// Heart silhouette pressed into the relief.
    Heart,
    /// Four panels assembled into an open box.
    BoxLamp,
}

impl ShapeSpec {
    /// Closed cylinder with the default radius.
    #[must_use]
    pub const fn cylinder() -> Self {
        Self::Cylinder {
            radius_mm: DEFAULT_RADIUS_MM,
        }
    }

    /// Partial cylinder with the default radius and arc.
    #[must_use]
    pub const fn arc_cylinder() -> Self {
        Self::ArcCylinder {
            radius_mm: DEFAULT_RADIUS_MM,
            arc_degrees: DEFAULT_ARC_DEGREES,
        }
    }

    /// Standing arc with the default radius and arc.
    #[must_use]
    pub const fn stand_arc() -> Self {
        Self::StandArc {
            radius_mm: DEFAULT_RADIUS_MM,
            arc_degrees: DEFAULT_ARC_DEGREES,
        }
    }

    /// Custom curve with the default strength.
    #[must_use]
    pub const fn custom_curve() -> Self {
        Self::CustomCurve {
            strength: DEFAULT_CURVE_STRENGTH,
        }
    }

    /// Short kebab-case name of the variant.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Cylinder { .. } => "cylinder",
            Self::ArcCylinder { .. } => "arc-cylinder",
            Self::StandArc { .. } => "stand-arc",
            Self::Dome => "dome",
            Self::Wave { .. } => "wave",
            Self::CustomCurve { .. } => "custom-curve",
            Self::Heart => "heart",
            Self::BoxLamp => "box-lamp",
        }
    }
}

impl std::fmt::Display for ShapeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap radius actually used: non-finite means the default, then floored at 1 mm.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn effective_radius(radius_mm: f64) -> f64 {
    let radius = finite_or(radius_mm, DEFAULT_RADIUS_MM).max(MIN_RADIUS_MM);
    if radius != radius_mm {
        debug!("Radius {} mm clamped to {} mm", radius_mm, radius);
    }
    radius
}

/// Fraction of a full turn covered by `arc_degrees`, clamped to `[lo, hi]`.
///
/// Zero or non-finite arcs mean the default 180 degrees.
#[must_use]
pub fn arc_fraction(arc_degrees: f64, lo: f64, hi: f64) -> f64 {
    let degrees = if arc_degrees.is_finite() && arc_degrees != 0.0 {
        arc_degrees
    } else {
        DEFAULT_ARC_DEGREES
    };
    let fraction = (degrees / 360.0).clamp(lo, hi);
    if (fraction * 360.0 - arc_degrees).abs() > 1e-9 {
        debug!("Arc {} deg clamped to {} deg", arc_degrees, fraction * 360.0);
    }
    fraction
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}
