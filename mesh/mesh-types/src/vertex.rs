//! Mesh vertices.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of a mesh corner plus its shading normal.
///
/// `normal` stays `None` until [`IndexedMesh::recompute_normals`] runs. The
/// builders call it after every stage that moves positions.
///
/// [`IndexedMesh::recompute_normals`]: crate::IndexedMesh::recompute_normals
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Vertex};
///
/// let corner = Vertex::from_coords(-60.0, 45.0, 3.2);
/// assert_eq!(corner.position, Point3::new(-60.0, 45.0, 3.2));
/// assert!(corner.normal.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in mm.
    pub position: Point3<f64>,

    /// Unit normal, area-weighted over the faces using this vertex.
    pub normal: Option<Vector3<f64>>,
}

impl Vertex {
    /// Vertex at `position` with no normal yet.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Vertex at `(x, y, z)` with no normal yet.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // nalgebra constructors are not const
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_vertex_has_no_normal() {
        let v = Vertex::from_coords(1.5, -2.0, 0.8);
        assert_eq!(v, Vertex::new(Point3::new(1.5, -2.0, 0.8)));
        assert!(v.normal.is_none());
    }
}
