//! Multi-panel assemblies.

use std::f64::consts::{FRAC_PI_2, PI};

use mesh_types::{IndexedMesh, Vector3};
use tracing::{debug, info};

use crate::error::{BuildError, BuildResult};

/// Open four-sided lamp shade made from one panel.
///
/// The panel is centered on the origin and cloned onto the four sides of a
/// box, each pushed outward by `min_thickness_mm * 0.7 + 0.8`:
///
/// | Side  | Rotation about Y | Offset |
/// |-------|------------------|--------|
/// | front | none             | +Z     |
/// | right | -90°             | +X     |
/// | back  | 180°             | -Z     |
/// | left  | +90°             | -X     |
///
/// The result is a triangle soup with four times the panel's faces.
///
/// # Example
///
/// ```
/// use mesh_lithophane::assembly::box_lamp;
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mut panel = IndexedMesh::new();
/// panel.vertices.push(Vertex::from_coords(-5.0, -5.0, 0.0));
/// panel.vertices.push(Vertex::from_coords(5.0, -5.0, 0.0));
/// panel.vertices.push(Vertex::from_coords(0.0, 5.0, 1.0));
/// panel.faces.push([0, 1, 2]);
///
/// let lamp = box_lamp(panel, 0.8);
/// assert_eq!(lamp.face_count(), 4);
/// ```
#[must_use]
pub fn box_lamp(panel: IndexedMesh, min_thickness_mm: f64) -> IndexedMesh {
    let mut base = panel.unindexed();
    base.recenter();

    let depth = min_thickness_mm.mul_add(0.7, 0.8);
    let sides: [(f64, Vector3<f64>); 4] = [
        (0.0, Vector3::new(0.0, 0.0, depth)),
        (-FRAC_PI_2, Vector3::new(depth, 0.0, 0.0)),
        (PI, Vector3::new(0.0, 0.0, -depth)),
        (FRAC_PI_2, Vector3::new(-depth, 0.0, 0.0)),
    ];

    let mut lamp = IndexedMesh::with_capacity(base.vertices.len() * 4, base.faces.len() * 4);
    for (angle, offset) in sides {
        let mut side = base.clone();
        if angle != 0.0 {
            side.rotate_y(angle);
        }
        side.translate(offset);
        lamp.merge(&side);
    }

    debug!(
        "Box lamp: 4 sides at {:.2} mm, {} faces",
        depth,
        lamp.faces.len()
    );
    lamp
}

/// Merge several built lithophanes into one triangle soup.
///
/// Meshes keep their own placement; nothing is moved.
///
/// # Errors
///
/// Returns [`BuildError::EmptyScene`] if `meshes` is empty.
pub fn union_all(meshes: &[IndexedMesh]) -> BuildResult<IndexedMesh> {
    if meshes.is_empty() {
        return Err(BuildError::empty_scene());
    }

    let total_faces = meshes.iter().map(|m| m.faces.len()).sum::<usize>();
    let mut scene = IndexedMesh::with_capacity(total_faces * 3, total_faces);
    for mesh in meshes {
        scene.merge(&mesh.unindexed());
    }

    info!(
        "Merged {} meshes into {} triangles",
        meshes.len(),
        scene.faces.len()
    );
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::{MeshBounds, MeshTopology, Vertex};

    /// 20 x 10 mm slab footprint with front at z = 2, back at z = 0.
    fn panel() -> IndexedMesh {
        let mut mesh = IndexedMesh::new();
        for [x, y, z] in [
            [-10.0, -5.0, 2.0],
            [10.0, -5.0, 2.0],
            [10.0, 5.0, 2.0],
            [-10.0, 5.0, 0.0],
        ] {
            mesh.vertices.push(Vertex::from_coords(x, y, z));
        }
        mesh.faces.push([0, 1, 2]);
        mesh.faces.push([0, 2, 3]);
        mesh
    }

    #[test]
    fn box_lamp_places_four_sides() {
        let lamp = box_lamp(panel(), 1.0);
        assert_eq!(lamp.face_count(), 8);
        assert!(lamp.is_unindexed());

        // Recentered panel spans x in [-10, 10], z in [-1, 1]; offset is 1.5
        let side = |i: usize| &lamp.vertices[i * 6..(i + 1) * 6];
        let within = |v: f64, lo: f64, hi: f64| v >= lo - 1e-9 && v <= hi + 1e-9;

        assert!(side(0).iter().all(|v| within(v.position.z, 0.5, 2.5)));
        assert!(side(1).iter().all(|v| within(v.position.x, 0.5, 2.5)));
        assert!(side(2).iter().all(|v| within(v.position.z, -2.5, -0.5)));
        assert!(side(3).iter().all(|v| within(v.position.x, -2.5, -0.5)));

        let bounds = lamp.bounds();
        assert_relative_eq!(bounds.max.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.min.z, -10.0, epsilon = 1e-9);
        // Height is untouched
        assert_relative_eq!(bounds.min.y, -5.0, epsilon = 1e-9);
        assert_relative_eq!(bounds.max.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn box_lamp_rotates_normals_with_sides() {
        let mut slab = panel();
        slab.recompute_normals();
        let lamp = box_lamp(slab, 1.0);
        let front = lamp.vertices[0].normal.unwrap();
        let right = lamp.vertices[6].normal.unwrap();
        let back = lamp.vertices[12].normal.unwrap();
        // -90 degrees about Y sends +Z to -X; 180 degrees flips Z
        assert_relative_eq!(right.x, -front.z, epsilon = 1e-12);
        assert_relative_eq!(back.z, -front.z, epsilon = 1e-12);
        assert_relative_eq!(right.y, front.y, epsilon = 1e-12);
    }

    #[test]
    fn union_needs_a_mesh() {
        assert!(matches!(union_all(&[]), Err(BuildError::EmptyScene)));
    }

    #[test]
    fn union_concatenates_soups() {
        let a = panel();
        let mut b = panel();
        b.translate(Vector3::new(0.0, 20.0, 0.0));
        let scene = union_all(&[a, b]).unwrap();
        assert_eq!(scene.face_count(), 4);
        assert_eq!(scene.vertex_count(), 12);
        assert!(scene.is_unindexed());
        assert_relative_eq!(scene.bounds().max.y, 25.0);
    }
}
