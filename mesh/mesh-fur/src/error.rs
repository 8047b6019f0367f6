//! Error types for shell-mesh generation.
//!
//! Every error is terminal for the current invocation: no partial mesh is
//! produced and whatever mesh the caller already holds stays in place.

use thiserror::Error;

/// Result type alias for shell-mesh operations.
pub type FurResult<T> = Result<T, FurError>;

/// Errors that can occur while generating a shell mesh.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FurError {
    /// No source mesh was supplied.
    #[error("no source mesh supplied")]
    MissingSource,

    /// No compute backend is available to run the expansion.
    #[error("no compute backend available for shell expansion")]
    MissingComputeCapability,

    /// Shell count or height is outside its valid range.
    #[error("invalid shell parameter: {0}")]
    InvalidParameter(String),

    /// Source mesh buffers are inconsistent with each other.
    #[error("malformed source mesh: {0}")]
    MalformedMesh(String),

    /// The expanded vertex count cannot be addressed by 32-bit indices.
    #[error("shell mesh too large: {vertices} vertices x {shells} shells exceeds u32 index range")]
    MeshTooLarge {
        /// Number of source vertices.
        vertices: usize,
        /// Requested shell count.
        shells: u32,
    },

    /// The compute backend could not be created.
    #[error("compute backend error: {0}")]
    Backend(String),
}

impl FurError {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(details: impl Into<String>) -> Self {
        Self::InvalidParameter(details.into())
    }

    /// Create a malformed mesh error.
    #[must_use]
    pub fn malformed_mesh(details: impl Into<String>) -> Self {
        Self::MalformedMesh(details.into())
    }

    /// Create a backend error.
    #[must_use]
    pub fn backend(details: impl Into<String>) -> Self {
        Self::Backend(details.into())
    }
}
