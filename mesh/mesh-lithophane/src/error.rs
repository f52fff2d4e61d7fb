//! Error types for lithophane builds.

use mesh_heightmap::HeightmapError;
use thiserror::Error;

/// Result type alias for lithophane operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors that can occur while building a lithophane mesh.
///
/// Out-of-range thickness and shape parameters are clamped rather than
/// reported, so a build either fails here or yields a complete mesh.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Source raster is zero-area or malformed.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Panel size or sampling density yields an unusable grid.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Any other heightmap failure.
    #[error("heightmap failed: {0}")]
    Heightmap(#[source] HeightmapError),

    /// Scene union was asked to merge nothing.
    #[error("scene is empty")]
    EmptyScene,
}

impl BuildError {
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

    /// Create an empty scene error.
    #[must_use]
    pub const fn empty_scene() -> Self {
        Self::EmptyScene
    }
}

impl From<HeightmapError> for BuildError {
    fn from(err: HeightmapError) -> Self {
        match err {
            HeightmapError::InvalidImage(details) => Self::InvalidImage(details),
            HeightmapError::InvalidDimensions(details) => Self::InvalidDimensions(details),
            other @ HeightmapError::SizeMismatch { .. } => Self::Heightmap(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BuildError::invalid_image("zero-area");
        assert!(format!("{err}").contains("zero-area"));

        let err = BuildError::invalid_dimensions("0x90");
        assert!(format!("{err}").contains("0x90"));

        let err = BuildError::empty_scene();
        assert!(format!("{err}").contains("empty"));
    }

    #[test]
    fn heightmap_errors_map_onto_build_kinds() {
        let err: BuildError = HeightmapError::invalid_dimensions("0x0").into();
        assert!(matches!(err, BuildError::InvalidDimensions(_)));

        let err: BuildError = HeightmapError::invalid_image("empty").into();
        assert!(matches!(err, BuildError::InvalidImage(_)));

        let err: BuildError = HeightmapError::SizeMismatch {
            expected: 4,
            actual: 2,
        }
        .into();
        assert!(matches!(err, BuildError::Heightmap(_)));
    }
}
