//! Thickness-mapped base panel.

// Mesh processing uses u32 indices; truncation would only occur for grids with >4B samples
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use mesh_heightmap::Heightmap;
use mesh_types::{IndexedMesh, Vertex};
use tracing::debug;

use crate::config::PanelSpec;
use crate::error::{BuildError, BuildResult};

/// Physical extent and sample grid of a panel.
///
/// The grid spans `width_mm x height_mm` centered on the origin, with
/// `columns` samples along X and `rows` along Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelLayout {
    /// Extent along X, in mm.
    pub width_mm: f64,
    /// Extent along Y, in mm.
    pub height_mm: f64,
    /// Samples per row.
    pub columns: usize,
    /// Number of rows.
    pub rows: usize,
}

impl PanelLayout {
    /// Validate a layout.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidDimensions`] if either extent is not a
    /// positive finite number, or if either axis has fewer than two samples
    /// (no quads to tessellate).
    pub fn new(width_mm: f64, height_mm: f64, columns: usize, rows: usize) -> BuildResult<Self> {
        if !(width_mm.is_finite() && width_mm > 0.0 && height_mm.is_finite() && height_mm > 0.0) {
            return Err(BuildError::invalid_dimensions(format!(
                "panel extent must be positive, got {width_mm} x {height_mm} mm"
            )));
        }
        if columns < 2 || rows < 2 {
            return Err(BuildError::invalid_dimensions(format!(
                "panel grid needs at least 2x2 samples, got {columns}x{rows}"
            )));
        }
        Ok(Self {
            width_mm,
            height_mm,
            columns,
            rows,
        })
    }

    /// Layout of `panel` sampled by `heightmap`.
    ///
    /// # Errors
    ///
    /// See [`PanelLayout::new`].
    pub fn for_heightmap(panel: &PanelSpec, heightmap: &Heightmap) -> BuildResult<Self> {
        Self::new(panel.width_mm, panel.height_mm, heightmap.width(), heightmap.height())
    }

    /// Spacing between columns, in mm.
    #[must_use]
    pub fn column_pitch(&self) -> f64 {
        self.width_mm / (self.columns - 1) as f64
    }

    /// Spacing between rows, in mm.
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.height_mm / (self.rows - 1) as f64
    }

    /// Planar X of column `ix`.
    #[must_use]
    pub fn x(&self, ix: usize) -> f64 {
        ix as f64 * self.column_pitch() - self.width_mm / 2.0
    }

    /// Planar Y of row `iy`; row 0 is the top edge.
    #[must_use]
    pub fn y(&self, iy: usize) -> f64 {
        self.height_mm / 2.0 - iy as f64 * self.row_pitch()
    }
}

/// Map a normalized height to relief thickness.
///
/// `h = 0` (darkest) gives `max_mm`, `h = 1` (brightest) gives `min_mm`.
#[inline]
#[must_use]
pub fn thickness_at(h: f64, min_mm: f64, max_mm: f64) -> f64 {
    (1.0 - h).mul_add(max_mm - min_mm, min_mm)
}

/// Tessellate a heightmap into a flat relief panel.
///
/// One vertex per heightmap sample, two triangles per grid cell, wound
/// counter-clockwise seen from +Z. The back face lies implicitly at `z = 0`;
/// the front surface sits at the thickness mapped from each sample.
///
/// # Errors
///
/// Returns [`BuildError::InvalidDimensions`] if the grid has fewer than two
/// samples on either axis or the panel extent is not positive.
///
/// # Example
///
/// ```
/// use mesh_heightmap::Heightmap;
/// use mesh_lithophane::{PanelSpec, build_panel};
/// use mesh_types::MeshTopology;
///
/// let hm = Heightmap::filled(4, 3, 0.5).unwrap();
/// let mesh = build_panel(&hm, &PanelSpec::new(30.0, 20.0)).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 12);
/// assert_eq!(mesh.face_count(), 12);
/// ```
pub fn build_panel(heightmap: &Heightmap, panel: &PanelSpec) -> BuildResult<IndexedMesh> {
    let layout = PanelLayout::for_heightmap(panel, heightmap)?;
    let (min_mm, max_mm) = panel.thickness_range();
    let (cols, rows) = (layout.columns, layout.rows);

    let mut mesh = IndexedMesh::with_capacity(cols * rows, 2 * (cols - 1) * (rows - 1));

    for (i, &h) in heightmap.values().iter().enumerate() {
        let (ix, iy) = (i % cols, i / cols);
        mesh.vertices.push(Vertex::from_coords(
            layout.x(ix),
            layout.y(iy),
            thickness_at(h, min_mm, max_mm),
        ));
    }

    for iy in 0..rows - 1 {
        for ix in 0..cols - 1 {
            let top_left = (iy * cols + ix) as u32;
            let top_right = top_left + 1;
            let bottom_left = top_left + cols as u32;
            let bottom_right = bottom_left + 1;
            mesh.faces.push([top_left, bottom_left, top_right]);
            mesh.faces.push([bottom_left, bottom_right, top_right]);
        }
    }

    mesh.recompute_normals();
    debug!(
        "Panel {}x{} samples: {} vertices, {} faces",
        cols,
        rows,
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshBounds, MeshTopology};

    #[test]
    fn thickness_maps_dark_to_thick() {
        assert_relative_eq!(thickness_at(0.0, 0.8, 3.2), 3.2);
        assert_relative_eq!(thickness_at(1.0, 0.8, 3.2), 0.8);
        assert_relative_eq!(thickness_at(0.5, 0.8, 3.2), 2.0);
    }

    #[test]
    fn panel_is_centered_and_sized() {
        let hm = Heightmap::filled(5, 4, 0.0).unwrap();
        let mesh = build_panel(&hm, &PanelSpec::new(40.0, 30.0)).unwrap();
        let bounds = mesh.bounds();
        assert_relative_eq!(bounds.min.x, -20.0);
        assert_relative_eq!(bounds.max.x, 20.0);
        assert_relative_eq!(bounds.min.y, -15.0);
        assert_relative_eq!(bounds.max.y, 15.0);
        assert_eq!(mesh.face_count(), 2 * 4 * 3);
    }

    #[test]
    fn first_row_is_top_edge() {
        let mut values = vec![0.0; 6];
        values[0] = 1.0;
        let hm = Heightmap::new(3, 2, values).unwrap();
        let mesh = build_panel(&hm, &PanelSpec::new(20.0, 10.0)).unwrap();
        let first = mesh.vertices[0].position;
        assert_relative_eq!(first.x, -10.0);
        assert_relative_eq!(first.y, 5.0);
        assert_relative_eq!(first.z, 0.8);
        assert_relative_eq!(mesh.vertices[5].position.z, 3.2);
    }

    #[test]
    fn faces_point_toward_viewer() {
        let hm = Heightmap::filled(3, 3, 0.2).unwrap();
        let mesh = build_panel(&hm, &PanelSpec::new(10.0, 10.0)).unwrap();
        for tri in mesh.triangles() {
            assert!(tri.area_vector().z > 0.0);
        }
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal.unwrap().z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn single_row_grid_is_rejected() {
        let hm = Heightmap::filled(5, 1, 0.5).unwrap();
        let err = build_panel(&hm, &PanelSpec::new(10.0, 10.0));
        assert!(matches!(err, Err(BuildError::InvalidDimensions(_))));
    }

    #[test]
    fn layout_pitch() {
        let layout = PanelLayout::new(100.0, 50.0, 101, 26).unwrap();
        assert_relative_eq!(layout.column_pitch(), 1.0);
        assert_relative_eq!(layout.row_pitch(), 2.0);
        assert_relative_eq!(layout.x(100), 50.0);
        assert_relative_eq!(layout.y(25), -25.0);
        assert!(PanelLayout::new(-1.0, 50.0, 4, 4).is_err());
    }
}
