//! Triangles resolved to positions.

use nalgebra::{Point3, Vector3};

/// One face of a mesh with its corner positions looked up.
///
/// Corners are stored in winding order, so the face points along
/// `(b - a) × (c - a)`.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Triangle};
///
/// // Lower-left half of a 2 x 2 mm relief cell, seen from +Z
/// let tri = Triangle::new(
///     Point3::new(0.0, 2.0, 1.0),
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(2.0, 2.0, 1.0),
/// );
///
/// assert!((tri.area() - 2.0).abs() < 1e-12);
/// assert!(tri.area_vector().z > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First corner.
    pub a: Point3<f64>,
    /// Second corner.
    pub b: Point3<f64>,
    /// Third corner.
    pub c: Point3<f64>,
}

impl Triangle {
    /// Triangle from corners in winding order.
    #[inline]
    #[must_use]
    pub const fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { a, b, c }
    }

    /// Face normal whose length is twice the area.
    ///
    /// Vertex normals accumulate this directly, which weights each face by
    /// its size.
    #[inline]
    #[must_use]
    pub fn area_vector(&self) -> Vector3<f64> {
        (self.b - self.a).cross(&(self.c - self.a))
    }

    /// Surface area in mm².
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        0.5 * self.area_vector().norm()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winding_sets_direction() {
        let ccw = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        );
        let cw = Triangle::new(ccw.a, ccw.c, ccw.b);
        assert!(ccw.area_vector().z > 0.0);
        assert!(cw.area_vector().z < 0.0);
    }

    #[test]
    fn area_of_tilted_triangle() {
        // 3-4-5 right triangle standing in the X-Z plane
        let tri = Triangle::new(
            Point3::new(0.0, 7.0, 0.0),
            Point3::new(3.0, 7.0, 0.0),
            Point3::new(0.0, 7.0, 4.0),
        );
        assert!((tri.area() - 6.0).abs() < 1e-12);
        assert!(tri.area_vector().x.abs() < 1e-12);
    }

    #[test]
    fn collinear_corners_have_zero_area() {
        let tri = Triangle::new(
            Point3::origin(),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert!(tri.area() < 1e-12);
    }
}
