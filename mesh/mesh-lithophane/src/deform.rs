//! Shape deformers.
//!
//! Each deformer takes ownership of a mesh, rewrites vertex positions in
//! place, recomputes normals and hands the mesh back. Deformers read the
//! mesh's current bounding box, so a panel that already carries its frame
//! bends as one piece.

use std::f64::consts::TAU;

use mesh_types::{IndexedMesh, MeshBounds};
use tracing::debug;

use crate::assembly::box_lamp;
use crate::config::{DEFAULT_CURVE_STRENGTH, ShapeSpec, arc_fraction, effective_radius};

/// How far outside-the-heart regions are pushed back, in mm.
pub const HEART_PUSH_MM: f64 = 2.0;

/// Depth of the custom curve's bow as a fraction of mesh width.
const CURVE_DEPTH_RATIO: f64 = 0.04;

/// Arc fraction limits for [`ShapeSpec::ArcCylinder`].
const ARC_CYLINDER_RANGE: (f64, f64) = (0.1, 1.0);

/// Arc fraction limits for [`ShapeSpec::StandArc`].
const STAND_ARC_RANGE: (f64, f64) = (0.2, 0.8);

/// Apply the deformer selected by `shape`.
///
/// [`ShapeSpec::Dome`] is generated from the heightmap rather than deformed,
/// so here it passes the mesh through. `min_thickness_mm` sizes the box lamp.
#[must_use]
pub fn apply_shape(mesh: IndexedMesh, shape: &ShapeSpec, min_thickness_mm: f64) -> IndexedMesh {
    debug!("Applying shape: {}", shape);
    match *shape {
        ShapeSpec::Flat | ShapeSpec::Dome => mesh,
        ShapeSpec::Cylinder { radius_mm } => cylinder_wrap(mesh, effective_radius(radius_mm), 1.0),
        ShapeSpec::ArcCylinder {
            radius_mm,
            arc_degrees,
        } => {
            let (lo, hi) = ARC_CYLINDER_RANGE;
            cylinder_wrap(mesh, effective_radius(radius_mm), arc_fraction(arc_degrees, lo, hi))
        }
        ShapeSpec::StandArc {
            radius_mm,
            arc_degrees,
        } => {
            let (lo, hi) = STAND_ARC_RANGE;
            cylinder_wrap(mesh, effective_radius(radius_mm), arc_fraction(arc_degrees, lo, hi))
        }
        ShapeSpec::Wave { amplitude_mm } => wave(mesh, amplitude_mm),
        ShapeSpec::CustomCurve { strength } => custom_curve(mesh, strength),
        ShapeSpec::Heart => heart_mask(mesh),
        ShapeSpec::BoxLamp => box_lamp(mesh, min_thickness_mm),
    }
}

/// Bend the mesh around a vertical cylinder.
///
/// The mesh's X extent maps onto `arc_fraction` of a full turn, centered on
/// the +Z axis. Z is treated as radial offset, so the back plane (`z = 0`)
/// lands on the cylinder of `radius` and thickness is preserved along the
/// normal. The cylinder axis sits at `z = -radius`; Y is untouched.
///
/// # Example
///
/// ```
/// use mesh_lithophane::deform::cylinder_wrap;
/// use mesh_types::{IndexedMesh, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(-10.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(10.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 5.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// let bent = cylinder_wrap(mesh, 20.0, 0.5);
/// // Ends of a half turn meet the axis plane
/// assert!((bent.vertices[0].position.z + 20.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn cylinder_wrap(mut mesh: IndexedMesh, radius: f64, arc_fraction: f64) -> IndexedMesh {
    let bounds = mesh.bounds();
    let total_arc = TAU * arc_fraction;

    for vertex in &mut mesh.vertices {
        let p = &mut vertex.position;
        let u = bounds.normalized_x(p.x);
        let (sin_a, cos_a) = (total_arc * (u - 0.5)).sin_cos();
        let r = radius + p.z;
        p.x = sin_a * r;
        p.z = cos_a.mul_add(r, -radius);
    }

    debug!(
        "Cylinder wrap r={} mm over {:.1} deg",
        radius,
        arc_fraction * 360.0
    );
    mesh.recompute_normals();
    mesh
}

/// Ripple the surface along X with one full sine period.
///
/// `z += sin(2πu) * amplitude` with `u` the normalized X position. A zero or
/// non-finite amplitude leaves the mesh exactly as it was.
#[must_use]
pub fn wave(mut mesh: IndexedMesh, amplitude: f64) -> IndexedMesh {
    if amplitude == 0.0 || !amplitude.is_finite() {
        return mesh;
    }
    let bounds = mesh.bounds();
    for vertex in &mut mesh.vertices {
        let u = bounds.normalized_x(vertex.position.x);
        vertex.position.z += (TAU * u).sin() * amplitude;
    }
    mesh.recompute_normals();
    mesh
}

/// Bow the mesh forward with a symmetric power curve.
///
/// `z += (|2u - 1|^k - 1) * -0.04 * width`: the left and right edges stay
/// put and the center comes forward by 4% of the width. Larger `k` keeps the
/// middle flatter. A negative strength uses `|k|` and bows the center back
/// instead. Zero or non-finite strength means the default 1.5.
#[must_use]
pub fn custom_curve(mut mesh: IndexedMesh, strength: f64) -> IndexedMesh {
    let k = if strength.is_finite() && strength != 0.0 {
        strength
    } else {
        debug!("Curve strength {} replaced by {}", strength, DEFAULT_CURVE_STRENGTH);
        DEFAULT_CURVE_STRENGTH
    };
    if k < 0.0 {
        debug!("Negative curve strength {}: bowing back with exponent {}", k, -k);
    }
    let bounds = mesh.bounds();
    let depth = CURVE_DEPTH_RATIO * bounds.size().x * k.signum();

    for vertex in &mut mesh.vertices {
        let u = bounds.normalized_x(vertex.position.x);
        let edge = (2.0 * u - 1.0).abs().powf(k.abs());
        vertex.position.z += (1.0 - edge) * depth;
    }
    mesh.recompute_normals();
    mesh
}

/// Press a heart silhouette into the relief.
///
/// Positions are normalized to `[-1, 1]` across the bounding box. Vertices
/// outside the curve `(x² + y² - 0.3)³ - x²y³ = 0` move back by
/// [`HEART_PUSH_MM`]. Nothing is cut, so topology is unchanged.
#[must_use]
pub fn heart_mask(mut mesh: IndexedMesh) -> IndexedMesh {
    let bounds = mesh.bounds();
    if bounds.is_empty() {
        return mesh;
    }
    let center = bounds.center();
    let half = bounds.size() / 2.0;
    let sx = if half.x > f64::EPSILON { half.x } else { 1.0 };
    let sy = if half.y > f64::EPSILON { half.y } else { 1.0 };

    let mut pushed = 0usize;
    for vertex in &mut mesh.vertices {
        let x = (vertex.position.x - center.x) / sx;
        let y = (vertex.position.y - center.y) / sy;
        if is_outside_heart(x, y) {
            vertex.position.z -= HEART_PUSH_MM;
            pushed += 1;
        }
    }
    debug!("Heart mask pushed {} of {} vertices", pushed, mesh.vertices.len());
    mesh.recompute_normals();
    mesh
}

/// True when the normalized point lies outside the heart curve.
#[inline]
#[must_use]
pub fn is_outside_heart(x: f64, y: f64) -> bool {
    let (x2, y3) = (x * x, y * y * y);
    (x2 + y * y - 0.3).powi(3) - x2 * y3 > 0.0
}
