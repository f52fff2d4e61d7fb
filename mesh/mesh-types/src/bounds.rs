//! Axis-aligned bounds.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box of a mesh.
///
/// Deformers read normalized X positions off the box of the mesh they are
/// bending; print metrics come from the box of the finished mesh.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let panel = Aabb::enclosing([
///     Point3::new(-60.0, -45.0, 0.8),
///     Point3::new(60.0, 45.0, 3.2),
/// ]);
///
/// assert!((panel.size().x - 120.0).abs() < 1e-12);
/// assert!((panel.normalized_x(30.0) - 0.75).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Smallest coordinate on each axis.
    pub min: Point3<f64>,
    /// Largest coordinate on each axis.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Box around a set of points.
    ///
    /// No points gives an inverted box for which [`is_empty`](Self::is_empty)
    /// holds.
    #[must_use]
    pub fn enclosing(points: impl IntoIterator<Item = Point3<f64>>) -> Self {
        let inverted = Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        };
        points.into_iter().fold(inverted, |acc, p| Self {
            min: acc.min.inf(&p),
            max: acc.max.sup(&p),
        })
    }

    /// True when the box encloses nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        (0..3).any(|axis| self.min[axis] > self.max[axis])
    }

    /// Extents along X, Y and Z; zero for an empty box.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            Vector3::zeros()
        } else {
            self.max - self.min
        }
    }

    /// Midpoint of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Box volume in mm³; zero for an empty box.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.size().product()
    }

    /// Where `x` falls across the box width: `0` at the left edge, `1` at
    /// the right.
    ///
    /// A box of zero width puts everything on its center line at `0.5`.
    #[inline]
    #[must_use]
    pub fn normalized_x(&self, x: f64) -> f64 {
        let width = self.max.x - self.min.x;
        if width > f64::EPSILON {
            (x - self.min.x) / width
        } else {
            0.5
        }
    }
}
