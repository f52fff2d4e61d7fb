//! Spherical cap generated straight from the heightmap.

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::f64::consts::FRAC_PI_2;

use mesh_heightmap::Heightmap;
use mesh_types::{IndexedMesh, Vertex};
use tracing::debug;

use crate::config::PanelSpec;
use crate::error::BuildResult;
use crate::panel::{PanelLayout, thickness_at};

/// Dome radius as a divisor of the panel's longer side.
const DOME_RADIUS_DIVISOR: f64 = 1.8;

/// Build a dome lithophane.
///
/// Each sample's planar distance from the panel center, relative to half the
/// longer side, maps to a polar angle in `[0, π/2]`. The sample is placed on
/// a sphere of radius `max(W, H) / 1.8` at that angle, with its relief
/// thickness added along Z. Samples at or beyond the inscribed circle land
/// on the equator.
///
/// Borders do not apply to domes.
///
/// # Errors
///
/// Returns [`BuildError::InvalidDimensions`](crate::BuildError::InvalidDimensions)
/// if the grid has fewer than two samples on either axis.
pub fn build_dome(heightmap: &Heightmap, panel: &PanelSpec) -> BuildResult<IndexedMesh> {
    let layout = PanelLayout::for_heightmap(panel, heightmap)?;
    let (min_mm, max_mm) = panel.thickness_range();
    let (cols, rows) = (layout.columns, layout.rows);

    let longest = layout.width_mm.max(layout.height_mm);
    let radius = longest / DOME_RADIUS_DIVISOR;
    let max_r = longest / 2.0;

    let mut mesh = IndexedMesh::with_capacity(cols * rows, 2 * (cols - 1) * (rows - 1));

    for (i, &h) in heightmap.values().iter().enumerate() {
        let (ix, iy) = (i % cols, i / cols);
        let px = (ix as f64 / (cols - 1) as f64 - 0.5) * layout.width_mm;
        let py = (iy as f64 / (rows - 1) as f64 - 0.5) * layout.height_mm;
        let r = px.hypot(py);

        let theta = (r / max_r).min(1.0) * FRAC_PI_2;
        let (sin_t, cos_t) = theta.sin_cos();
        let scale = if r == 0.0 { 0.0 } else { sin_t * radius / r };

        mesh.vertices.push(Vertex::from_coords(
            px * scale,
            py * scale,
            cos_t.mul_add(radius, thickness_at(h, min_mm, max_mm)),
        ));
    }

    for iy in 0..rows - 1 {
        for ix in 0..cols - 1 {
            let i0 = (iy * cols + ix) as u32;
            let i1 = i0 + 1;
            let i2 = i0 + cols as u32;
            let i3 = i2 + 1;
            mesh.faces.push([i0, i2, i1]);
            mesh.faces.push([i1, i2, i3]);
        }
    }

    mesh.recompute_normals();
    debug!(
        "Dome r={:.2} mm: {} vertices, {} faces",
        radius,
        mesh.vertices.len(),
        mesh.faces.len()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::MeshTopology;

    #[test]
    fn center_sits_on_pole() {
        let hm = Heightmap::filled(5, 5, 0.0).unwrap();
        let panel = PanelSpec::new(36.0, 36.0);
        let dome = build_dome(&hm, &panel).unwrap();

        let center = dome.vertices[12].position;
        assert_relative_eq!(center.x, 0.0);
        assert_relative_eq!(center.y, 0.0);
        // R = 36 / 1.8 = 20, plus max thickness 3.2
        assert_relative_eq!(center.z, 23.2, epsilon = 1e-12);
    }

    #[test]
    fn edge_midpoints_reach_equator() {
        let hm = Heightmap::filled(5, 5, 1.0).unwrap();
        let dome = build_dome(&hm, &PanelSpec::new(36.0, 36.0)).unwrap();

        // Row 2, column 4 is 18 mm from center: exactly max_r
        let p = dome.vertices[14].position;
        assert_relative_eq!(p.x, 20.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, 0.8, epsilon = 1e-9);
    }

    #[test]
    fn samples_stay_within_dome_radius() {
        let hm = Heightmap::filled(7, 5, 0.5).unwrap();
        let dome = build_dome(&hm, &PanelSpec::new(60.0, 40.0)).unwrap();
        let radius = 60.0 / 1.8;
        for v in &dome.vertices {
            let p = v.position;
            let on_sphere = (p.x * p.x + p.y * p.y + (p.z - 2.0).powi(2)).sqrt();
            assert_relative_eq!(on_sphere, radius, epsilon = 1e-9);
        }
        assert_eq!(dome.face_count(), 2 * 6 * 4);
    }
}
