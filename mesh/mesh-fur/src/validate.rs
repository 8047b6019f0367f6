//! Input validation for shell-mesh generation.

use tracing::{debug, warn};

use crate::backend::ComputeBackend;
use crate::error::{FurError, FurResult};
use crate::mesh::SourceMesh;
use crate::params::ShellParams;

/// Inputs that passed validation, with parameters resolved.
#[derive(Debug, Clone)]
pub struct ValidatedInput<'a> {
    source: &'a SourceMesh,
    backend: &'a dyn ComputeBackend,
    params: ShellParams,
}

impl<'a> ValidatedInput<'a> {
    /// The source mesh.
    #[must_use]
    pub const fn source(&self) -> &'a SourceMesh {
        self.source
    }

    /// The compute backend.
    #[must_use]
    pub const fn backend(&self) -> &'a dyn ComputeBackend {
        self.backend
    }

    /// Resolved parameters, within their valid ranges.
    #[must_use]
    pub const fn params(&self) -> &ShellParams {
        &self.params
    }
}

/// Check that a source mesh and a compute backend are present and the
/// parameters are usable.
///
/// Triangle indices are not range-checked; an out-of-range index is
/// reported with a warning and expansion proceeds.
///
/// # Errors
///
/// - [`FurError::MissingSource`] if `source` is `None`
/// - [`FurError::MissingComputeCapability`] if `backend` is `None`
/// - [`FurError::InvalidParameter`] if params are out of range and
///   clamping is disabled
/// - [`FurError::MeshTooLarge`] if `V * num_shells` does not fit 32-bit
///   indices
pub fn validate<'a>(
    source: Option<&'a SourceMesh>,
    backend: Option<&'a dyn ComputeBackend>,
    params: &ShellParams,
) -> FurResult<ValidatedInput<'a>> {
    let source = source.ok_or(FurError::MissingSource)?;
    let backend = backend.ok_or(FurError::MissingComputeCapability)?;
    let params = params.resolve()?;

    check_expanded_size(source.vertex_count(), params.num_shells)?;

    if source.is_empty() {
        debug!(
            vertices = source.vertex_count(),
            triangles = source.triangle_count(),
            "Source mesh has no surface; shell mesh will be empty"
        );
    }

    if let Some((slot, index)) = source.first_out_of_range_index() {
        warn!(
            slot,
            index,
            face = ?source.face(slot / 3),
            vertex_count = source.vertex_count(),
            "Source triangle index out of range; shell indices will not address valid vertices"
        );
    }

    Ok(ValidatedInput {
        source,
        backend,
        params,
    })
}

/// Check that `vertex_count * shells` vertices can be addressed by 32-bit
/// indices.
///
/// # Errors
///
/// Returns [`FurError::MeshTooLarge`] when the expanded vertex count exceeds
/// `2^32`.
pub(crate) fn check_expanded_size(vertex_count: usize, shells: u32) -> FurResult<()> {
    let total = vertex_count as u64 * u64::from(shells);
    if total > u64::from(u32::MAX) + 1 {
        return Err(FurError::MeshTooLarge {
            vertices: vertex_count,
            shells,
        });
    }
    Ok(())
}
