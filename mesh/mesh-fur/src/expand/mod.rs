//! Shell expansion.
//!
//! Duplicates the source surface once per shell, pushing each copy out along
//! the vertex normals, and re-bases each copy's triangles onto its own
//! vertex block. The work is cut into [`Tile`]s over disjoint output slices
//! and handed to a [`ComputeBackend`](crate::ComputeBackend), so the result
//! is the same for every backend, tile size and execution order.

mod kernel;
mod tile;

pub use kernel::ShellKernel;
pub use tile::{Tile, TriangleTile, VertexTile};

use nalgebra::{Point3, Vector2, Vector3};
use tracing::debug;

use crate::validate::ValidatedInput;

/// Raw expansion output, before index-width selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedBuffers {
    /// Vertex positions, `V * S` entries.
    pub positions: Vec<Point3<f32>>,
    /// Vertex normals, `V * S` entries.
    pub normals: Vec<Vector3<f32>>,
    /// Texture coordinates, `V * S` entries.
    pub uvs: Vec<Vector2<f32>>,
    /// Re-based triangle indices, `3 * T * S` entries.
    pub indices: Vec<u32>,
    /// Number of shells (`S`).
    pub shell_count: u32,
    /// Source vertex count (`V`).
    pub vertices_per_shell: usize,
    /// Source triangle count (`T`).
    pub triangles_per_shell: usize,
    /// Number of tiles dispatched.
    pub tile_count: usize,
}

/// Expand a validated source mesh into per-shell buffers on the backend it
/// was validated with.
#[must_use]
pub fn expand(input: &ValidatedInput<'_>) -> ExpandedBuffers {
    let source = input.source();
    let backend = input.backend();
    let params = input.params();

    let v = source.vertex_count();
    let t = source.triangle_count();
    let shells = params.num_shells as usize;
    let tile_size = params.effective_tile_size();

    let mut positions = vec![Point3::origin(); v * shells];
    let mut normals = vec![Vector3::zeros(); v * shells];
    let mut uvs = vec![Vector2::zeros(); v * shells];
    let mut indices = vec![0_u32; 3 * t * shells];

    let tiles = tile::build_tiles(
        &mut positions,
        &mut normals,
        &mut uvs,
        &mut indices,
        v,
        t,
        tile_size,
    );
    let tile_count = tiles.len();

    debug!(
        backend = backend.name(),
        tiles = tile_count,
        tile_size,
        "Dispatching shell expansion"
    );

    let kernel = ShellKernel::new(source, params);
    backend.dispatch(tiles, &kernel);

    ExpandedBuffers {
        positions,
        normals,
        uvs,
        indices,
        shell_count: params.num_shells,
        vertices_per_shell: v,
        triangles_per_shell: t,
        tile_count,
    }
}
