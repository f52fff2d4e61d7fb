//! Read-only views shared by the pipeline stages.

use crate::{Aabb, Triangle};

/// Counts and faces of a triangle mesh.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangles.
    fn face_count(&self) -> usize;

    /// True when there is nothing to draw.
    fn is_empty(&self) -> bool {
        self.face_count() == 0
    }

    /// Faces with their corner positions looked up.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Anything with an axis-aligned extent.
pub trait MeshBounds {
    /// Box around every vertex; empty for a mesh without vertices.
    fn bounds(&self) -> Aabb;
}
