//! Print estimates for a finished mesh.

use mesh_types::{IndexedMesh, MeshBounds, MeshTopology, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// PLA density in g/cm³.
pub const PLA_DENSITY_G_PER_CM3: f64 = 1.24;

/// Size, material and tessellation summary of a built mesh.
///
/// Volume is the bounding-box volume, a loose upper bound on printed
/// material rather than a mesh integral.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BuildMetrics {
    /// Bounding-box extents in mm.
    pub size: Vector3<f64>,
    /// Bounding-box volume in mm³.
    pub volume_mm3: f64,
    /// Bounding-box volume in cm³.
    pub volume_cm3: f64,
    /// Estimated PLA mass in grams.
    pub mass_g: f64,
    /// Number of triangles.
    pub triangle_count: usize,
    /// Triangles per mm² of the X-Y footprint.
    pub triangle_density: f64,
}

impl BuildMetrics {
    /// Measure a mesh.
    ///
    /// An empty mesh measures as zero everywhere. A zero footprint counts
    /// as 1 mm² for the density.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_lithophane::BuildMetrics;
    /// use mesh_types::{IndexedMesh, Vertex};
    ///
    /// let mut mesh = IndexedMesh::new();
    /// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
    /// mesh.vertices.push(Vertex::from_coords(10.0, 0.0, 0.0));
    /// mesh.vertices.push(Vertex::from_coords(10.0, 10.0, 10.0));
    /// mesh.faces.push([0, 1, 2]);
    ///
    /// let metrics = BuildMetrics::from_mesh(&mesh);
    /// assert_eq!(metrics.volume_cm3, 1.0);
    /// assert_eq!(metrics.triangle_density, 0.01);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_mesh(mesh: &IndexedMesh) -> Self {
        let bounds = mesh.bounds();
        let size = bounds.size();
        let volume_mm3 = bounds.volume();
        let volume_cm3 = volume_mm3 / 1000.0;
        let triangle_count = mesh.face_count();

        let footprint = size.x * size.y;
        let footprint = if footprint > 0.0 { footprint } else { 1.0 };

        Self {
            size,
            volume_mm3,
            volume_cm3,
            mass_g: volume_cm3 * PLA_DENSITY_G_PER_CM3,
            triangle_count,
            triangle_density: triangle_count as f64 / footprint,
        }
    }
}

impl std::fmt::Display for BuildMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Size:      {:.1} x {:.1} x {:.1} mm",
            self.size.x, self.size.y, self.size.z
        )?;
        writeln!(f, "Triangles: {}", self.triangle_count)?;
        writeln!(f, "Density:   {:.1} tris/mm²", self.triangle_density)?;
        writeln!(f, "Volume:    {:.2} cm³", self.volume_cm3)?;
        write!(f, "Mass:      {:.2} g (PLA)", self.mass_g)
    }
}
