//! Regeneration lifecycle for a shell mesh bound to a renderer.
//!
//! [`ShellMeshGenerator`] owns the inputs and a [`MeshSink`]. Changing an
//! input does nothing by itself; the owner calls
//! [`ShellMeshGenerator::regenerate`] when it wants the mesh rebuilt. A
//! failed regeneration leaves the sink's current mesh alone.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mesh_fur::{unit_quad, MeshSlot, SequentialBackend, ShellMeshGenerator, ShellParams};
//!
//! let mut generator = ShellMeshGenerator::new(MeshSlot::new())
//!     .with_source(Arc::new(unit_quad()))
//!     .with_backend(Arc::new(SequentialBackend));
//!
//! generator.set_params(ShellParams::new(16, 0.25));
//! generator.regenerate().expect("inputs are set");
//!
//! assert_eq!(generator.sink().mesh().map(|m| m.shell_count()), Some(16));
//! ```

use std::sync::Arc;

use crate::backend::ComputeBackend;
use crate::error::FurResult;
use crate::mesh::{ExpandedMesh, SourceMesh};
use crate::params::ShellParams;
use crate::pipeline::{generate_shell_mesh, ShellExpansionResult};

/// Receiver of finished shell meshes, typically a renderer.
pub trait MeshSink {
    /// Replace whatever mesh the sink currently displays.
    fn replace_mesh(&mut self, mesh: ExpandedMesh);
}

/// A sink that keeps the latest mesh in memory.
#[derive(Debug, Clone, Default)]
pub struct MeshSlot {
    mesh: Option<ExpandedMesh>,
    replacements: u64,
}

impl MeshSlot {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mesh: None,
            replacements: 0,
        }
    }

    /// Current mesh, if one has been assigned.
    #[must_use]
    pub const fn mesh(&self) -> Option<&ExpandedMesh> {
        self.mesh.as_ref()
    }

    /// Take the current mesh out of the slot.
    pub fn take(&mut self) -> Option<ExpandedMesh> {
        self.mesh.take()
    }

    /// How many times a mesh has been assigned.
    #[must_use]
    pub const fn replacements(&self) -> u64 {
        self.replacements
    }
}

impl MeshSink for MeshSlot {
    fn replace_mesh(&mut self, mesh: ExpandedMesh) {
        self.mesh = Some(mesh);
        self.replacements += 1;
    }
}

/// Owns shell-mesh inputs and rebuilds the mesh on request.
#[derive(Debug)]
pub struct ShellMeshGenerator<S: MeshSink> {
    source: Option<Arc<SourceMesh>>,
    params: ShellParams,
    backend: Option<Arc<dyn ComputeBackend>>,
    sink: S,
}

impl<S: MeshSink> ShellMeshGenerator<S> {
    /// Create a generator with default params and no source or backend.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self {
            source: None,
            params: ShellParams::default(),
            backend: None,
            sink,
        }
    }

    /// Set the source mesh.
    #[must_use]
    pub fn with_source(mut self, source: Arc<SourceMesh>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the params.
    #[must_use]
    pub fn with_params(mut self, params: ShellParams) -> Self {
        self.params = params;
        self
    }

    /// Set the compute backend.
    #[must_use]
    pub fn with_backend(mut self, backend: Arc<dyn ComputeBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Replace the source mesh.
    pub fn set_source(&mut self, source: Arc<SourceMesh>) {
        self.source = Some(source);
    }

    /// Remove the source mesh.
    pub fn clear_source(&mut self) {
        self.source = None;
    }

    /// Replace the params.
    pub fn set_params(&mut self, params: ShellParams) {
        self.params = params;
    }

    /// Replace the compute backend.
    pub fn set_backend(&mut self, backend: Arc<dyn ComputeBackend>) {
        self.backend = Some(backend);
    }

    /// Remove the compute backend.
    pub fn clear_backend(&mut self) {
        self.backend = None;
    }

    /// Current params.
    #[must_use]
    pub const fn params(&self) -> &ShellParams {
        &self.params
    }

    /// Current source mesh.
    #[must_use]
    pub fn source(&self) -> Option<&SourceMesh> {
        self.source.as_deref()
    }

    /// The sink meshes are delivered to.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the generator and return its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Rebuild the shell mesh from the current inputs and hand it to the
    /// sink.
    ///
    /// # Errors
    ///
    /// Returns the generation error; the sink is not touched.
    pub fn regenerate(&mut self) -> FurResult<ShellExpansionResult> {
        let (mesh, result) = generate_shell_mesh(
            self.source.as_deref(),
            &self.params,
            self.backend.as_deref(),
        )?;
        self.sink.replace_mesh(mesh);
        Ok(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::SequentialBackend;
    use crate::error::FurError;
    use crate::mesh::unit_quad;

    fn ready() -> ShellMeshGenerator<MeshSlot> {
        ShellMeshGenerator::new(MeshSlot::new())
            .with_source(Arc::new(unit_quad()))
            .with_backend(Arc::new(SequentialBackend))
    }

    #[test]
    fn test_new_generator_has_no_mesh() {
        let generator = ShellMeshGenerator::new(MeshSlot::new());
        assert!(generator.sink().mesh().is_none());
        assert!(generator.source().is_none());
        assert_eq!(generator.params(), &ShellParams::default());
    }

    #[test]
    fn test_setters_do_not_regenerate() {
        let mut generator = ready();
        generator.set_params(ShellParams::new(5, 1.0));
        assert_eq!(generator.sink().replacements(), 0);
    }

    #[test]
    fn test_regenerate_replaces_mesh() {
        let mut generator = ready();

        generator.regenerate().unwrap();
        assert_eq!(generator.sink().mesh().unwrap().shell_count(), 2);

        generator.set_params(ShellParams::new(9, 1.0));
        generator.regenerate().unwrap();
        assert_eq!(generator.sink().mesh().unwrap().shell_count(), 9);
        assert_eq!(generator.sink().replacements(), 2);
    }

    #[test]
    fn test_failed_regenerate_keeps_previous_mesh() {
        let mut generator = ready();
        generator.regenerate().unwrap();
        let before = generator.sink().mesh().cloned();

        generator.clear_source();
        assert!(matches!(generator.regenerate(), Err(FurError::MissingSource)));
        assert_eq!(generator.sink().mesh().cloned(), before);

        generator.set_source(Arc::new(unit_quad()));
        generator.clear_backend();
        assert!(matches!(
            generator.regenerate(),
            Err(FurError::MissingComputeCapability)
        ));

        generator.set_backend(Arc::new(SequentialBackend));
        generator.set_params(ShellParams::new(0, 1.0));
        assert!(matches!(
            generator.regenerate(),
            Err(FurError::InvalidParameter(_))
        ));

        assert_eq!(generator.sink().mesh().cloned(), before);
        assert_eq!(generator.sink().replacements(), 1);
    }

    #[test]
    fn test_into_sink() {
        let mut generator = ready();
        generator.regenerate().unwrap();
        let mut slot = generator.into_sink();
        assert!(slot.take().is_some());
        assert!(slot.mesh().is_none());
    }
}
