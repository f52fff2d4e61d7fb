//! Lithophane meshes from images.
//!
//! A lithophane is a relief whose local thickness encodes brightness: held
//! against a light, thin regions glow and thick ones stay dark. This crate
//! turns a [`RasterSample`](mesh_heightmap::RasterSample) into a printable
//! [`IndexedMesh`](mesh_types::IndexedMesh) in five stages:
//!
//! 1. Heightmap extraction and smoothing ([`build_heightmap`])
//! 2. Base panel tessellation ([`build_panel`])
//! 3. Optional flat frame ([`add_border`])
//! 4. Shape: cylinder wraps, wave, curve, heart mask ([`deform`]), dome
//!    ([`build_dome`]) or four-sided lamp ([`assembly::box_lamp`])
//! 5. Drop to floor and [`BuildMetrics`]
//!
//! # Layer 0 Crate
//!
//! No file I/O and no rendering. Meshes leave the crate as owned values; use
//! the flat buffer accessors on `IndexedMesh` to hand them to a viewer.
//!
//! # Quick Start
//!
//! ```
//! use mesh_heightmap::RasterSample;
//! use mesh_lithophane::{LithophaneBuilder, ShapeSpec};
//!
//! // 2x2 checkerboard
//! let rgba = vec![
//!     0, 0, 0, 255,   255, 255, 255, 255,
//!     255, 255, 255, 255,   0, 0, 0, 255,
//! ];
//! let raster = RasterSample::from_rgba(2, 2, rgba).unwrap();
//!
//! let build = LithophaneBuilder::new(&raster)
//!     .size_mm(30.0, 30.0)
//!     .border_mm(3.0, 2.0)
//!     .shape(ShapeSpec::arc_cylinder())
//!     .build()
//!     .unwrap();
//!
//! println!("{}", build.metrics);
//! ```
//!
//! # Ordering
//!
//! The frame is attached while the panel is still flat and the deformer then
//! bends panel and frame together. Changing this order would leave the frame
//! straight behind a curved panel.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod assembly;
mod border;
mod config;
pub mod deform;
mod dome;
mod error;
mod metrics;
mod panel;
mod pipeline;

pub use assembly::{box_lamp, union_all};
pub use border::{FRAME_Z_OFFSET_MM, add_border};
pub use config::{
    BorderSpec, DEFAULT_ARC_DEGREES, DEFAULT_CURVE_STRENGTH, DEFAULT_RADIUS_MM, PanelSpec, ShapeSpec,
    arc_fraction, effective_radius,
};
pub use deform::{HEART_PUSH_MM, apply_shape, custom_curve, cylinder_wrap, heart_mask, wave};
pub use dome::build_dome;
pub use error::{BuildError, BuildResult};
pub use metrics::{BuildMetrics, PLA_DENSITY_G_PER_CM3};
pub use panel::{PanelLayout, build_panel, thickness_at};
pub use pipeline::{LithophaneBuild, LithophaneBuilder, build_heightmap, build_mesh, mesh_from_heightmap};

// Re-export the pipeline's input and output types
pub use mesh_heightmap::{Heightmap, RasterSample};
pub use mesh_types::IndexedMesh;
