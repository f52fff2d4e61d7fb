//! End-to-end build from raster to placed mesh.

use mesh_heightmap::{Heightmap, RasterSample, extract_heightmap, smooth};
use mesh_types::{IndexedMesh, MeshBounds};
use tracing::{debug, info};

use crate::border::add_border;
use crate::config::{BorderSpec, PanelSpec, ShapeSpec};
use crate::deform::apply_shape;
use crate::dome::build_dome;
use crate::error::BuildResult;
use crate::metrics::BuildMetrics;
use crate::panel::{PanelLayout, build_panel};

/// Output of a full build.
#[derive(Debug, Clone)]
pub struct LithophaneBuild {
    /// Finished mesh, resting on `y = 0`.
    pub mesh: IndexedMesh,
    /// Size and material estimates for `mesh`.
    pub metrics: BuildMetrics,
    /// Smoothed heightmap the mesh was built from.
    pub heightmap: Heightmap,
}

/// Extract and smooth the heightmap for a panel.
///
/// This is the preview path: it stops before any geometry is built.
///
/// # Errors
///
/// - [`BuildError::InvalidDimensions`](crate::BuildError::InvalidDimensions)
///   if the panel samples to less than one pixel on either axis
pub fn build_heightmap(raster: &RasterSample, panel: &PanelSpec) -> BuildResult<Heightmap> {
    let params = panel.extract_params()?;
    debug!(
        "Extracting {}x{} heightmap from {}x{} raster",
        params.width_px,
        params.height_px,
        raster.width(),
        raster.height()
    );
    let heightmap = extract_heightmap(raster, &params)?;
    Ok(smooth(heightmap, panel.blur_radius_px))
}

/// Build a lithophane mesh.
///
/// Stages run in a fixed order:
/// 1. Heightmap extraction and smoothing
/// 2. Base panel (or dome, which replaces panel, border and deformer)
/// 3. Border, while the panel is still planar
/// 4. Shape deformer, then box assembly for [`ShapeSpec::BoxLamp`]
/// 5. Drop to floor and measure
///
/// # Errors
///
/// - [`BuildError::InvalidDimensions`](crate::BuildError::InvalidDimensions)
///   if the sampled grid has fewer than two samples on either axis
/// - [`BuildError::InvalidImage`](crate::BuildError::InvalidImage) if the
///   raster cannot be sampled
///
/// # Example
///
/// ```
/// use mesh_heightmap::RasterSample;
/// use mesh_lithophane::{BorderSpec, PanelSpec, ShapeSpec, build_mesh};
///
/// let raster = RasterSample::from_rgba(2, 2, vec![128; 16]).unwrap();
/// let panel = PanelSpec::new(20.0, 10.0).with_pixels_per_mm(1.0);
///
/// let build = build_mesh(&raster, &panel, &BorderSpec::none(), &ShapeSpec::Flat).unwrap();
/// assert_eq!(build.mesh.vertices.len(), 20 * 10);
/// ```
pub fn build_mesh(
    raster: &RasterSample,
    panel: &PanelSpec,
    border: &BorderSpec,
    shape: &ShapeSpec,
) -> BuildResult<LithophaneBuild> {
    let heightmap = build_heightmap(raster, panel)?;
    let mesh = mesh_from_heightmap(&heightmap, panel, border, shape)?;
    let metrics = BuildMetrics::from_mesh(&mesh);

    let bounds = mesh.bounds();
    info!(
        "Built {} lithophane: {} triangles, {:.1} x {:.1} x {:.1} mm",
        shape,
        metrics.triangle_count,
        metrics.size.x,
        metrics.size.y,
        metrics.size.z
    );
    debug!("Final bounds: {:?} .. {:?}", bounds.min, bounds.max);

    Ok(LithophaneBuild {
        mesh,
        metrics,
        heightmap,
    })
}

/// Geometry stages of [`build_mesh`] for an already prepared heightmap.
///
/// # Errors
///
/// Returns [`BuildError::InvalidDimensions`](crate::BuildError::InvalidDimensions)
/// if the heightmap has fewer than two samples on either axis.
pub fn mesh_from_heightmap(
    heightmap: &Heightmap,
    panel: &PanelSpec,
    border: &BorderSpec,
    shape: &ShapeSpec,
) -> BuildResult<IndexedMesh> {
    let mut mesh = if matches!(shape, ShapeSpec::Dome) {
        build_dome(heightmap, panel)?
    } else {
        let layout = PanelLayout::for_heightmap(panel, heightmap)?;
        let flat = add_border(build_panel(heightmap, panel)?, border, &layout);
        let (min_mm, _) = panel.thickness_range();
        apply_shape(flat, shape, min_mm)
    };
    mesh.place_on_y_zero();
    Ok(mesh)
}

/// Fluent builder for lithophane meshes.
///
/// # Example
///
/// ```
/// use mesh_heightmap::RasterSample;
/// use mesh_lithophane::{LithophaneBuilder, PanelSpec, ShapeSpec};
///
/// let raster = RasterSample::from_rgba(4, 4, vec![200; 64]).unwrap();
///
/// let build = LithophaneBuilder::new(&raster)
///     .panel(PanelSpec::new(40.0, 40.0).with_pixels_per_mm(0.5))
///     .border_mm(2.0, 1.5)
///     .shape(ShapeSpec::cylinder())
///     .build()
///     .unwrap();
///
/// assert!(build.metrics.triangle_count > 0);
/// ```
#[derive(Debug, Clone)]
pub struct LithophaneBuilder<'a> {
    raster: &'a RasterSample,
    panel: PanelSpec,
    border: BorderSpec,
    shape: ShapeSpec,
}

impl<'a> LithophaneBuilder<'a> {
    /// Start a build with default panel, no border and a flat shape.
    #[must_use]
    pub fn new(raster: &'a RasterSample) -> Self {
        Self {
            raster,
            panel: PanelSpec::default(),
            border: BorderSpec::none(),
            shape: ShapeSpec::Flat,
        }
    }

    /// Replace the panel settings.
    #[must_use]
    pub fn panel(mut self, panel: PanelSpec) -> Self {
        self.panel = panel;
        self
    }

    /// Set panel size, keeping the other panel settings.
    #[must_use]
    pub const fn size_mm(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.panel.width_mm = width_mm;
        self.panel.height_mm = height_mm;
        self
    }

    /// Set panel width and derive height from the raster's aspect ratio.
    #[must_use]
    pub fn width_keep_aspect(mut self, width_mm: f64) -> Self {
        self.panel.width_mm = width_mm;
        self.panel.height_mm = width_mm / self.raster.aspect_ratio();
        self
    }

    /// Set the thickness range.
    #[must_use]
    pub const fn thickness(mut self, min_mm: f64, max_mm: f64) -> Self {
        self.panel.min_thickness_mm = min_mm;
        self.panel.max_thickness_mm = max_mm;
        self
    }

    /// Replace the border settings.
    #[must_use]
    pub const fn border(mut self, border: BorderSpec) -> Self {
        self.border = border;
        self
    }

    /// Add a frame of the given band width and depth.
    #[must_use]
    pub const fn border_mm(mut self, width_mm: f64, height_mm: f64) -> Self {
        self.border = BorderSpec::new(width_mm, height_mm);
        self
    }

    /// Select the shape.
    #[must_use]
    pub const fn shape(mut self, shape: ShapeSpec) -> Self {
        self.shape = shape;
        self
    }

    /// Run the build.
    ///
    /// # Errors
    ///
    /// See [`build_mesh`].
    pub fn build(self) -> BuildResult<LithophaneBuild> {
        build_mesh(self.raster, &self.panel, &self.border, &self.shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuildError;
    use approx::assert_relative_eq;
    use mesh_types::MeshTopology;

    fn gray_raster(w: u32, h: u32, value: u8) -> RasterSample {
        let rgba = (0..w * h).flat_map(|_| [value, value, value, 255]).collect();
        RasterSample::from_rgba(w, h, rgba).unwrap()
    }

    #[test]
    fn heightmap_matches_panel_grid() {
        let raster = gray_raster(8, 8, 40);
        let panel = PanelSpec::new(12.0, 6.0).with_pixels_per_mm(1.0).with_blur_radius(2);
        let hm = build_heightmap(&raster, &panel).unwrap();
        assert_eq!((hm.width(), hm.height()), (12, 6));
    }

    #[test]
    fn tiny_panel_is_invalid() {
        let raster = gray_raster(4, 4, 40);
        let panel = PanelSpec::new(1.5, 10.0).with_pixels_per_mm(1.0);
        let err = build_mesh(&raster, &panel, &BorderSpec::none(), &ShapeSpec::Flat);
        assert!(matches!(err, Err(BuildError::InvalidDimensions(_))));
    }

    #[test]
    fn mesh_rests_on_floor() {
        let raster = gray_raster(4, 4, 40);
        let panel = PanelSpec::new(10.0, 10.0).with_pixels_per_mm(1.0);
        for shape in [
            ShapeSpec::Flat,
            ShapeSpec::Dome,
            ShapeSpec::Heart,
            ShapeSpec::BoxLamp,
            ShapeSpec::stand_arc(),
        ] {
            let build = build_mesh(&raster, &panel, &BorderSpec::new(1.0, 1.0), &shape).unwrap();
            assert_relative_eq!(build.mesh.bounds().min.y, 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn dome_ignores_border() {
        let raster = gray_raster(4, 4, 40);
        let panel = PanelSpec::new(10.0, 10.0).with_pixels_per_mm(1.0);
        let with = build_mesh(&raster, &panel, &BorderSpec::new(2.0, 2.0), &ShapeSpec::Dome).unwrap();
        let without = build_mesh(&raster, &panel, &BorderSpec::none(), &ShapeSpec::Dome).unwrap();
        assert_eq!(with.mesh.face_count(), without.mesh.face_count());
    }

    #[test]
    fn builder_keeps_aspect() {
        let raster = gray_raster(40, 20, 90);
        let build = LithophaneBuilder::new(&raster)
            .width_keep_aspect(30.0)
            .thickness(1.0, 2.0)
            .build()
            .unwrap();
        assert_relative_eq!(build.metrics.size.x, 30.0, epsilon = 1e-9);
        assert_relative_eq!(build.metrics.size.y, 15.0, epsilon = 1e-9);
    }
}
