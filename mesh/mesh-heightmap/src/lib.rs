//! Heightmaps from raster images.
//!
//! This crate turns a decoded image into a normalized scalar grid that later
//! stages read as material thickness:
//!
//! - [`RasterSample`] - Decoded RGBA8 input
//! - [`Heightmap`] - Row-major grid of heights in `[0, 1]`
//! - [`extract_heightmap`] - Resample, BT.709 luminance, gamma, invert, normalize
//! - [`smooth`] - Separable box blur with edge-narrowing windows
//! - [`center_crop`] / [`auto_enhance`] - Optional raster preparation
//!
//! # Layer 0 Crate
//!
//! Pure functions over owned buffers. File decoding and encoding are left to
//! the caller; [`Heightmap::to_preview_image`] returns an in-memory image.
//!
//! # Example
//!
//! ```
//! use mesh_heightmap::{ExtractParams, RasterSample, extract_heightmap, smooth};
//!
//! // 4x1 strip from black to white
//! let rgba: Vec<u8> = [0u8, 85, 170, 255]
//!     .iter()
//!     .flat_map(|&c| [c, c, c, 255])
//!     .collect();
//! let raster = RasterSample::from_rgba(4, 1, rgba).unwrap();
//!
//! let hm = extract_heightmap(&raster, &ExtractParams::new(4, 1)).unwrap();
//! assert_eq!(hm.min_max(), (0.0, 1.0));
//!
//! let blurred = smooth(hm, 1);
//! assert_eq!(blurred.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod extract;
mod heightmap;
mod prepare;
mod raster;
mod smooth;

pub use error::{HeightmapError, HeightmapResult};
pub use extract::{BT709_WEIGHTS, ExtractParams, extract_heightmap, luminance};
pub use heightmap::Heightmap;
pub use prepare::{auto_enhance, center_crop};
pub use raster::RasterSample;
pub use smooth::smooth;
