//! Core mesh types for the lithophane workspace.
//!
//! This crate provides the geometry every pipeline stage passes around:
//!
//! - [`Vertex`] - A point in 3D space with an optional derived normal
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Layer 0 Crate
//!
//! No rendering or windowing dependencies. The mesh is handed to viewers and
//! exporters as flat buffers via [`IndexedMesh::position_buffer`],
//! [`IndexedMesh::normal_buffer`] and [`IndexedMesh::index_buffer`].
//!
//! # Units
//!
//! All coordinates are `f64` millimeters.
//!
//! # Coordinate System
//!
//! Right-handed, matching how a lithophane stands on a build plate:
//! - X: panel width (left/right)
//! - Y: panel height (up, image top is +Y)
//! - Z: relief thickness (toward the viewer)
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//!
//! # Indexed and unindexed meshes
//!
//! A grid panel shares vertices between neighbouring quads. Once sub-meshes
//! with unrelated topology are merged (panel plus frame, four box sides) the
//! mesh becomes a *triangle soup*: every face owns three private vertices.
//! [`IndexedMesh::unindexed`] performs that conversion and
//! [`IndexedMesh::is_unindexed`] detects it.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Vertex, IndexedMesh, MeshTopology};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//! mesh.recompute_normals();
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(mesh.vertices[0].normal.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::IndexedMesh;
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
