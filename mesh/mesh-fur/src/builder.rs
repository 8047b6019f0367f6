//! Fluent builder API for shell-mesh generation.
//!
//! # Example
//!
//! ```
//! use mesh_fur::{unit_quad, IndexWidth, ShellMeshBuilder};
//!
//! let quad = unit_quad();
//! let result = ShellMeshBuilder::new(&quad)
//!     .dense()
//!     .height(0.4)
//!     .sequential()
//!     .build()
//!     .expect("valid parameters");
//!
//! assert_eq!(result.mesh.shell_count(), 64);
//! assert_eq!(result.stats.index_width, IndexWidth::U16);
//! ```

use std::sync::Arc;

use crate::backend::{default_backend, ComputeBackend, SequentialBackend};
use crate::error::FurResult;
use crate::mesh::{ExpandedMesh, SourceMesh};
use crate::params::{IndexWidthPolicy, ShellParams};
use crate::pipeline::{generate_shell_mesh, ShellExpansionResult};

/// Result from [`ShellMeshBuilder`] containing the shell mesh and statistics.
#[derive(Debug)]
pub struct ShellMeshBuildResult {
    /// The generated shell mesh.
    pub mesh: ExpandedMesh,
    /// Statistics from shell generation.
    pub stats: ShellExpansionResult,
}

/// Fluent builder for shell-mesh generation.
///
/// Runs on [`default_backend`] unless another backend is chosen.
#[derive(Debug)]
pub struct ShellMeshBuilder<'a> {
    source: &'a SourceMesh,
    params: ShellParams,
    backend: Option<Arc<dyn ComputeBackend>>,
}

impl<'a> ShellMeshBuilder<'a> {
    /// Create a builder for `source` with default params.
    #[must_use]
    pub fn new(source: &'a SourceMesh) -> Self {
        Self {
            source,
            params: ShellParams::default(),
            backend: None,
        }
    }

    // =========================================================================
    // Shell Configuration
    // =========================================================================

    /// Set the number of shells, including the base surface.
    #[must_use]
    pub const fn shells(mut self, num_shells: u32) -> Self {
        self.params.num_shells = num_shells;
        self
    }

    /// Set the offset of the outermost shell.
    #[must_use]
    pub const fn height(mut self, total_height: f32) -> Self {
        self.params.total_height = total_height;
        self
    }

    /// Set the index width policy.
    #[must_use]
    pub const fn index_width(mut self, policy: IndexWidthPolicy) -> Self {
        self.params.index_width = policy;
        self
    }

    /// Clamp out-of-range parameters instead of rejecting them.
    #[must_use]
    pub const fn clamp(mut self, enable: bool) -> Self {
        self.params.clamp_parameters = enable;
        self
    }

    /// Set the number of vertices or triangles per work tile.
    #[must_use]
    pub const fn tile_size(mut self, tile_size: usize) -> Self {
        self.params.tile_size = tile_size;
        self
    }

    /// Replace all params at once.
    #[must_use]
    pub const fn params(mut self, params: ShellParams) -> Self {
        self.params = params;
        self
    }

    // =========================================================================
    // Backend
    // =========================================================================

    /// Run on the given backend.
    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn ComputeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Run on the calling thread.
    #[must_use]
    pub fn sequential(self) -> Self {
        self.backend(Arc::new(SequentialBackend))
    }

    // =========================================================================
    // Presets
    // =========================================================================

    /// Many closely spaced shells.
    ///
    /// Keeps the configured index policy, clamping and tile size.
    #[must_use]
    pub fn dense(mut self) -> Self {
        let preset = ShellParams::dense();
        self.params.num_shells = preset.num_shells;
        self.params.total_height = preset.total_height;
        self
    }

    /// Few shells over a short height, for previews.
    #[must_use]
    pub fn sparse(mut self) -> Self {
        let preset = ShellParams::sparse();
        self.params.num_shells = preset.num_shells;
        self.params.total_height = preset.total_height;
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Generate the shell mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the params are out of range and clamping is
    /// disabled, or the expanded mesh does not fit 32-bit indices.
    pub fn build(self) -> FurResult<ShellMeshBuildResult> {
        let backend = self.backend.unwrap_or_else(default_backend);
        let (mesh, stats) =
            generate_shell_mesh(Some(self.source), &self.params, Some(&*backend))?;
        Ok(ShellMeshBuildResult { mesh, stats })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::backend::RayonBackend;
    use crate::error::FurError;
    use crate::mesh::{unit_quad, IndexWidth};

    #[test]
    fn test_builder_defaults() {
        let quad = unit_quad();
        let builder = ShellMeshBuilder::new(&quad);

        assert_eq!(builder.params, ShellParams::default());
        assert!(builder.backend.is_none());
    }

    #[test]
    fn test_builder_chaining() {
        let quad = unit_quad();
        let builder = ShellMeshBuilder::new(&quad)
            .shells(12)
            .height(0.5)
            .index_width(IndexWidthPolicy::Always32)
            .clamp(true)
            .tile_size(64)
            .sequential();

        assert_eq!(builder.params.num_shells, 12);
        assert!((builder.params.total_height - 0.5).abs() < 1e-6);
        assert_eq!(builder.params.index_width, IndexWidthPolicy::Always32);
        assert!(builder.params.clamp_parameters);
        assert_eq!(builder.params.tile_size, 64);
        assert_eq!(builder.backend.as_ref().map(|b| b.name()), Some("sequential"));
    }

    #[test]
    fn test_presets_keep_layout_options() {
        let quad = unit_quad();
        let builder = ShellMeshBuilder::new(&quad).tile_size(7).dense();
        assert_eq!(builder.params.num_shells, 64);
        assert_eq!(builder.params.tile_size, 7);

        let builder = ShellMeshBuilder::new(&quad).sparse();
        assert_eq!(builder.params.num_shells, 8);
    }

    #[test]
    fn test_build_default_backend() {
        let quad = unit_quad();
        let result = ShellMeshBuilder::new(&quad).shells(5).height(1.0).build().unwrap();

        assert_eq!(result.mesh.vertex_count(), 20);
        assert_eq!(result.stats.backend, "rayon");
        assert_eq!(result.stats.index_width, IndexWidth::U16);
    }

    #[test]
    fn test_build_always32() {
        let quad = unit_quad();
        let result = ShellMeshBuilder::new(&quad)
            .index_width(IndexWidthPolicy::Always32)
            .backend(Arc::new(RayonBackend::with_threads(2).unwrap()))
            .build()
            .expect("should succeed");

        assert_eq!(result.mesh.index_width(), IndexWidth::U32);
    }

    #[test]
    fn test_build_rejects_invalid() {
        let quad = unit_quad();
        let err = ShellMeshBuilder::new(&quad).shells(1).build().unwrap_err();
        assert!(matches!(err, FurError::InvalidParameter(_)));

        let result = ShellMeshBuilder::new(&quad).shells(1).clamp(true).build().unwrap();
        assert_eq!(result.mesh.shell_count(), 2);
    }
}
