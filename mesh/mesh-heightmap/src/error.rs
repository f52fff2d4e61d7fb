//! Error types for heightmap operations.

use thiserror::Error;

/// Result type alias for heightmap operations.
pub type HeightmapResult<T> = Result<T, HeightmapError>;

/// Errors that can occur while building or reshaping a heightmap.
#[derive(Debug, Error)]
pub enum HeightmapError {
    /// Source raster is zero-area or its pixel buffer is malformed.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Requested sample grid is smaller than 1x1 or not representable.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Value buffer does not match the declared grid.
    #[error("heightmap expects {expected} values, got {actual}")]
    SizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },
}

impl HeightmapError {
    /// Create an invalid image error.
    #[must_use]
    pub fn invalid_image(details: impl Into<String>) -> Self {
        Self::InvalidImage(details.into())
    }

    /// Create an invalid dimensions error.
    #[must_use]
    pub fn invalid_dimensions(details: impl Into<String>) -> Self {
        Self::InvalidDimensions(details.into())
    }
}
