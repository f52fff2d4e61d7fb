//! Triangle meshes as the pipeline passes them between stages.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Triangle mesh with faces indexing into a vertex list.
///
/// A relief panel comes out of the grid builder with neighbouring quads
/// sharing vertices. Once unrelated parts are merged (panel plus frame, the
/// four sides of a lamp) the mesh is kept as a triangle soup instead, where
/// every face owns three vertices; see [`IndexedMesh::unindexed`].
///
/// Faces wind counter-clockwise seen from the side the normal points to.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, MeshTopology, Vertex};
///
/// let mesh = IndexedMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 1.2),
///         Vertex::from_coords(2.0, 0.0, 1.2),
///         Vertex::from_coords(0.0, 2.0, 1.2),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert_eq!(mesh.face_count(), 1);
/// assert!(mesh.is_unindexed());
/// assert_eq!(mesh.position_buffer().len(), 9);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Corner positions and normals.
    pub vertices: Vec<Vertex>,

    /// Vertex indices per triangle.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Mesh with no vertices or faces.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    /// Empty mesh with room for a known grid size.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self::from_parts(
            Vec::with_capacity(vertex_count),
            Vec::with_capacity(face_count),
        )
    }

    /// Mesh from already built vertex and face lists.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Shift every vertex by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for vertex in &mut self.vertices {
            vertex.position += offset;
        }
    }

    /// Translate mesh so its bounding-box minimum Y is at zero.
    ///
    /// Y is the vertical axis, so this stands the part on the floor.
    pub fn place_on_y_zero(&mut self) {
        let bounds = self.bounds();
        if !bounds.is_empty() {
            self.translate(Vector3::new(0.0, -bounds.min.y, 0.0));
        }
    }

    /// Translate mesh so its bounding-box center is at the origin.
    pub fn recenter(&mut self) {
        let bounds = self.bounds();
        if !bounds.is_empty() {
            self.translate(-bounds.center().coords);
        }
    }

    /// Rotate mesh about the vertical (Y) axis by `angle` radians.
    ///
    /// Positive angles turn +Z toward +X. Normals rotate with the positions.
    pub fn rotate_y(&mut self, angle: f64) {
        let (sin_a, cos_a) = angle.sin_cos();
        let rotate = |v: &mut Vector3<f64>| {
            let x = v.x;
            let z = v.z;
            v.x = x.mul_add(cos_a, z * sin_a);
            v.z = (-x).mul_add(sin_a, z * cos_a);
        };

        for vertex in &mut self.vertices {
            rotate(&mut vertex.position.coords);
            if let Some(ref mut normal) = vertex.normal {
                rotate(normal);
            }
        }
    }

    /// Recompute vertex normals from the current positions.
    ///
    /// Each vertex receives the area-weighted sum of its faces' normals,
    /// normalized. Vertices touched only by degenerate faces, or by none,
    /// get `None`.
    pub fn recompute_normals(&mut self) {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];

        for &[i0, i1, i2] in &self.faces {
            let n = Triangle::new(
                self.vertices[i0 as usize].position,
                self.vertices[i1 as usize].position,
                self.vertices[i2 as usize].position,
            )
            .area_vector();
            sums[i0 as usize] += n;
            sums[i1 as usize] += n;
            sums[i2 as usize] += n;
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            let len = sum.norm();
            vertex.normal = if len > 1e-12 { Some(sum / len) } else { None };
        }
    }

    /// Expand into a triangle soup where every face owns its three vertices.
    ///
    /// Positions and normals are copied per corner, so the result has
    /// exactly `3 * face_count` vertices.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, so vertex counts > 4B are unsupported
    pub fn unindexed(&self) -> Self {
        let mut soup = Self::with_capacity(self.faces.len() * 3, self.faces.len());
        for face in &self.faces {
            let base = soup.vertices.len() as u32;
            for &index in face {
                soup.vertices.push(self.vertices[index as usize].clone());
            }
            soup.faces.push([base, base + 1, base + 2]);
        }
        soup
    }

    /// True when every face owns three private, consecutive vertices.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn is_unindexed(&self) -> bool {
        self.vertices.len() == self.faces.len() * 3
            && self.faces.iter().enumerate().all(|(i, face)| {
                let base = (i * 3) as u32;
                *face == [base, base + 1, base + 2]
            })
    }

    /// Append `other`, shifting its face indices past our vertices.
    ///
    /// Two soups merge into a soup.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &Self) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|face| face.map(|i| i + base)));
    }

    /// Sum of face areas in mm².
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles().map(|tri| tri.area()).sum()
    }

    /// Flat `[x0, y0, z0, x1, ...]` position buffer for viewers.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn position_buffer(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| {
                let p = v.position;
                [p.x as f32, p.y as f32, p.z as f32]
            })
            .collect()
    }

    /// Flat normal buffer; vertices without a normal contribute zeros.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn normal_buffer(&self) -> Vec<f32> {
        self.vertices
            .iter()
            .flat_map(|v| {
                let n = v.normal.unwrap_or_else(Vector3::zeros);
                [n.x as f32, n.y as f32, n.z as f32]
            })
            .collect()
    }

    /// Flat index buffer, three entries per face.
    #[must_use]
    pub fn index_buffer(&self) -> Vec<u32> {
        self.faces.iter().flatten().copied().collect()
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.faces.iter().map(|&[i0, i1, i2]| {
            Triangle::new(
                self.vertices[i0 as usize].position,
                self.vertices[i1 as usize].position,
                self.vertices[i2 as usize].position,
            )
        })
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::enclosing(self.vertices.iter().map(|v| v.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unit square in the XY plane split into two CCW triangles.
    fn square() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 1.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn empty_mesh() {
        let mesh = IndexedMesh::new();
        assert!(mesh.is_empty());
        assert!(mesh.bounds().is_empty());
    }

    #[test]
    fn normals_point_along_z_for_ccw_square() {
        let mut mesh = square();
        mesh.recompute_normals();
        for v in &mesh.vertices {
            let n = v.normal.unwrap_or_else(Vector3::zeros);
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn unreferenced_vertex_has_no_normal() {
        let mut mesh = square();
        mesh.vertices.push(Vertex::from_coords(5.0, 5.0, 5.0));
        mesh.recompute_normals();
        assert!(mesh.vertices[4].normal.is_none());
    }

    #[test]
    fn unindexed_duplicates_shared_corners() {
        let mesh = square();
        assert!(!mesh.is_unindexed());

        let soup = mesh.unindexed();
        assert_eq!(soup.vertex_count(), 6);
        assert_eq!(soup.face_count(), 2);
        assert!(soup.is_unindexed());
        assert_relative_eq!(soup.surface_area(), mesh.surface_area(), epsilon = 1e-12);
    }

    #[test]
    fn merge_offsets_indices() {
        let mut a = square().unindexed();
        let b = square().unindexed();
        a.merge(&b);
        assert_eq!(a.vertex_count(), 12);
        assert_eq!(a.faces[2], [6, 7, 8]);
        assert!(a.is_unindexed());
    }

    #[test]
    fn place_on_y_zero_moves_only_y() {
        let mut mesh = square();
        mesh.translate(Vector3::new(3.0, -7.5, 2.0));
        mesh.place_on_y_zero();

        let b = mesh.bounds();
        assert_relative_eq!(b.min.y, 0.0);
        assert_relative_eq!(b.min.x, 3.0);
        assert_relative_eq!(b.min.z, 2.0);
    }

    #[test]
    fn recenter_moves_box_center_to_origin() {
        let mut mesh = square();
        mesh.translate(Vector3::new(10.0, 20.0, 30.0));
        mesh.recenter();
        let c = mesh.bounds().center();
        assert_relative_eq!(c.coords.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rotate_y_quarter_turn() {
        let mut mesh = IndexedMesh::from_parts(vec![Vertex::from_coords(1.0, 2.0, 0.0)], vec![]);
        mesh.rotate_y(std::f64::consts::FRAC_PI_2);
        let p = mesh.vertices[0].position;
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn rotate_y_carries_normals() {
        let mut mesh = square();
        mesh.recompute_normals();
        mesh.rotate_y(std::f64::consts::PI);
        let n = mesh.vertices[0].normal.unwrap_or_else(Vector3::zeros);
        assert_relative_eq!(n.z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn flat_buffers_have_expected_lengths() {
        let mut mesh = square();
        mesh.recompute_normals();
        assert_eq!(mesh.position_buffer().len(), 12);
        assert_eq!(mesh.normal_buffer().len(), 12);
        assert_eq!(mesh.index_buffer(), vec![0, 1, 2, 0, 2, 3]);
    }
}
