//! One-shot shell-mesh generation: validate, expand, assemble.

use std::time::Instant;

use tracing::{error, info};

use crate::assemble::assemble;
use crate::backend::ComputeBackend;
use crate::error::FurResult;
use crate::expand::expand;
use crate::mesh::{ExpandedMesh, IndexWidth, SourceMesh};
use crate::params::ShellParams;
use crate::validate::validate;

/// Statistics from one shell-mesh generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellExpansionResult {
    /// Source vertex count.
    pub source_vertex_count: usize,
    /// Source triangle count.
    pub source_triangle_count: usize,
    /// Shells generated, after clamping.
    pub shell_count: u32,
    /// Height of the outermost shell, after clamping.
    pub total_height: f32,
    /// Vertices in the output mesh.
    pub total_vertex_count: usize,
    /// Indices in the output mesh.
    pub total_index_count: usize,
    /// Index width of the output mesh.
    pub index_width: IndexWidth,
    /// Name of the backend that ran the expansion.
    pub backend: String,
    /// Number of work tiles dispatched.
    pub tile_count: usize,
    /// Wall-clock time of expansion and assembly in milliseconds.
    pub compute_time_ms: f64,
}

impl std::fmt::Display for ShellExpansionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shell mesh: {} shells, {} vertices, {} {} indices in {:.2}ms on {}",
            self.shell_count,
            self.total_vertex_count,
            self.total_index_count,
            self.index_width,
            self.compute_time_ms,
            self.backend
        )
    }
}

/// Generate a shell mesh from `source`.
///
/// # Arguments
/// * `source` - The surface to grow shells from
/// * `params` - Shell count, height and layout options
/// * `backend` - Compute capability that runs the expansion
///
/// # Returns
/// A tuple of (shell mesh, generation statistics).
///
/// # Errors
///
/// Returns an error if the source or backend is missing, or the parameters
/// are unusable. Nothing is produced on error.
///
/// # Example
///
/// ```
/// use mesh_fur::{generate_shell_mesh, unit_quad, SequentialBackend, ShellParams};
///
/// let quad = unit_quad();
/// let (mesh, stats) =
///     generate_shell_mesh(Some(&quad), &ShellParams::new(8, 0.5), Some(&SequentialBackend))
///         .expect("valid input");
///
/// assert_eq!(mesh.vertex_count(), 4 * 8);
/// assert_eq!(stats.shell_count, 8);
/// ```
pub fn generate_shell_mesh(
    source: Option<&SourceMesh>,
    params: &ShellParams,
    backend: Option<&dyn ComputeBackend>,
) -> FurResult<(ExpandedMesh, ShellExpansionResult)> {
    let input = validate(source, backend, params).inspect_err(|e| {
        error!("Shell mesh generation aborted: {}", e);
    })?;

    let source = input.source();
    let backend = input.backend();
    let params = input.params();

    info!(
        "Generating {} shells over height {:.3} from {} vertices, {} triangles on {}",
        params.num_shells,
        params.total_height,
        source.vertex_count(),
        source.triangle_count(),
        backend.name()
    );

    let start = Instant::now();
    let buffers = expand(&input);
    let tile_count = buffers.tile_count;
    let mesh = assemble(buffers, params.index_width);
    let compute_time_ms = start.elapsed().as_secs_f64() * 1000.0;

    let result = ShellExpansionResult {
        source_vertex_count: source.vertex_count(),
        source_triangle_count: source.triangle_count(),
        shell_count: params.num_shells,
        total_height: params.total_height,
        total_vertex_count: mesh.vertex_count(),
        total_index_count: mesh.indices.len(),
        index_width: mesh.index_width(),
        backend: backend.name().to_string(),
        tile_count,
        compute_time_ms,
    };

    info!("{}", result);

    Ok((mesh, result))
}
