//! Rectangular frame around the panel.

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]

use mesh_types::{IndexedMesh, Point3, Vector3, Vertex};
use tracing::debug;

use crate::config::BorderSpec;
use crate::panel::PanelLayout;

/// Frame sits this far behind the panel's back plane so the two never share
/// a coplanar face.
pub const FRAME_Z_OFFSET_MM: f64 = -0.001;

/// Surround a panel with a flat frame.
///
/// The frame is the outer rectangle `(W + 2bw) x (H + 2bw)` minus the panel's
/// `W x H` footprint, extruded along Z by the border height. Caps and walls
/// are subdivided at the panel's column and row pitch so a later bend curves
/// the frame instead of spanning it with straight chords.
///
/// Panel and frame are merged as a triangle soup. When the border is
/// disabled the panel is returned untouched.
///
/// Must run before any shape deformer, while the panel is still planar.
#[must_use]
pub fn add_border(panel: IndexedMesh, border: &BorderSpec, layout: &PanelLayout) -> IndexedMesh {
    if !border.is_enabled() {
        return panel;
    }

    let mut frame = build_frame(border, layout);
    frame.recompute_normals();

    let mut merged = panel.unindexed();
    merged.merge(&frame.unindexed());
    debug!(
        "Border {}x{} mm: {} frame faces, {} total",
        border.width_mm,
        border.height_mm,
        frame.faces.len(),
        merged.faces.len()
    );
    merged
}

/// Closed frame ring as an indexed mesh of planar quad strips.
fn build_frame(border: &BorderSpec, layout: &PanelLayout) -> IndexedMesh {
    let bw = border.width_mm;
    let (hw, hh) = (layout.width_mm / 2.0, layout.height_mm / 2.0);
    let (ow, oh) = (hw + bw, hh + bw);
    let (z0, z1) = (FRAME_Z_OFFSET_MM, border.height_mm + FRAME_Z_OFFSET_MM);

    let col_pitch = layout.column_pitch();
    let row_pitch = layout.row_pitch();
    let outer_cols = segments(2.0 * ow, col_pitch);
    let outer_rows = segments(2.0 * oh, row_pitch);
    let inner_cols = layout.columns - 1;
    let inner_rows = layout.rows - 1;

    let x = Vector3::x();
    let y = Vector3::y();
    let z = Vector3::z();
    let depth = z * border.height_mm;

    let mut mesh = IndexedMesh::new();
    let mut strip = |origin: Point3<f64>, u: Vector3<f64>, v: Vector3<f64>, nu: usize, nv: usize| {
        push_quad_grid(&mut mesh, origin, u, v, nu, nv);
    };

    // Front cap (+Z): top and bottom bands span the full outer width,
    // side bands fill between them.
    for (oy, band) in [(hh, bw), (-oh, bw)] {
        strip(Point3::new(-ow, oy, z1), x * 2.0 * ow, y * band, outer_cols, 1);
    }
    for ox in [-ow, hw] {
        strip(Point3::new(ox, -hh, z1), x * bw, y * 2.0 * hh, 1, inner_rows);
    }

    // Back cap (-Z): same bands with swapped axes
    for (oy, band) in [(hh, bw), (-oh, bw)] {
        strip(Point3::new(-ow, oy, z0), y * band, x * 2.0 * ow, 1, outer_cols);
    }
    for ox in [-ow, hw] {
        strip(Point3::new(ox, -hh, z0), y * 2.0 * hh, x * bw, inner_rows, 1);
    }

    // Outer walls face away from the panel
    strip(Point3::new(-ow, oh, z0), depth, x * 2.0 * ow, 1, outer_cols);
    strip(Point3::new(-ow, -oh, z0), x * 2.0 * ow, depth, outer_cols, 1);
    strip(Point3::new(ow, -oh, z0), y * 2.0 * oh, depth, outer_rows, 1);
    strip(Point3::new(-ow, -oh, z0), depth, y * 2.0 * oh, 1, outer_rows);

    // Hole walls face the panel
    strip(Point3::new(-hw, hh, z0), x * 2.0 * hw, depth, inner_cols, 1);
    strip(Point3::new(-hw, -hh, z0), depth, x * 2.0 * hw, 1, inner_cols);
    strip(Point3::new(hw, -hh, z0), depth, y * 2.0 * hh, 1, inner_rows);
    strip(Point3::new(-hw, -hh, z0), y * 2.0 * hh, depth, inner_rows, 1);

    mesh
}

/// Number of segments needed to keep spacing at or below `pitch`.
fn segments(length: f64, pitch: f64) -> usize {
    ((length / pitch) - 1e-9).ceil().max(1.0) as usize
}

/// Append an `nu x nv` grid of quads spanning `origin + [0,1]u + [0,1]v`.
///
/// Faces wind so their normal is `u x v`.
fn push_quad_grid(
    mesh: &mut IndexedMesh,
    origin: Point3<f64>,
    u: Vector3<f64>,
    v: Vector3<f64>,
    nu: usize,
    nv: usize,
) {
    let base = mesh.vertices.len() as u32;
    for j in 0..=nv {
        for i in 0..=nu {
            let p = origin + u * (i as f64 / nu as f64) + v * (j as f64 / nv as f64);
            mesh.vertices.push(Vertex::new(p));
        }
    }

    let stride = (nu + 1) as u32;
    for j in 0..nv as u32 {
        for i in 0..nu as u32 {
            let p00 = base + j * stride + i;
            let p10 = p00 + 1;
            let p01 = p00 + stride;
            let p11 = p01 + 1;
            mesh.faces.push([p00, p10, p11]);
            mesh.faces.push([p00, p11, p01]);
        }
    }
}
