//! Packing expansion buffers into the final shell mesh.

use tracing::{debug, warn};

use crate::expand::ExpandedBuffers;
use crate::mesh::{ExpandedMesh, IndexBuffer, IndexWidth, ShellColor};
use crate::params::IndexWidthPolicy;

/// Pack expansion buffers into an [`ExpandedMesh`].
///
/// Index width is 32-bit whenever the total vertex count exceeds 65535 or
/// `policy` is [`IndexWidthPolicy::Always32`], 16-bit otherwise. Colors are
/// allocated zero-filled.
#[must_use]
pub fn assemble(buffers: ExpandedBuffers, policy: IndexWidthPolicy) -> ExpandedMesh {
    let total_vertices = buffers.positions.len();
    let required = IndexWidth::for_vertex_count(total_vertices);

    if required == IndexWidth::U32 {
        warn!(
            total_vertices,
            "Shell mesh will exceed 16-bit index limit; using 32-bit indices"
        );
    }

    let width = match policy {
        IndexWidthPolicy::Auto => required,
        IndexWidthPolicy::Always32 => IndexWidth::U32,
    };

    let indices = match width {
        IndexWidth::U16 => narrow_indices(buffers.indices),
        IndexWidth::U32 => IndexBuffer::U32(buffers.indices),
    };

    debug!(
        total_vertices,
        total_indices = indices.len(),
        index_width = %indices.width(),
        index_bytes = indices.len() * indices.width().bytes(),
        "Assembled shell mesh"
    );

    let colors: Vec<ShellColor> = vec![[0.0; 4]; total_vertices];

    ExpandedMesh::from_parts(
        buffers.positions,
        buffers.normals,
        buffers.uvs,
        colors,
        indices,
        buffers.shell_count,
        buffers.vertices_per_shell,
        buffers.triangles_per_shell,
    )
}

// Indices re-based from out-of-range source indices can exceed u16 even
// when the vertex count fits; keep 32-bit storage rather than truncate.
fn narrow_indices(indices: Vec<u32>) -> IndexBuffer {
    match indices
        .iter()
        .map(|&i| u16::try_from(i))
        .collect::<Result<Vec<u16>, _>>()
    {
        Ok(narrow) => IndexBuffer::U16(narrow),
        Err(_) => {
            warn!("Index exceeds 16-bit range; keeping 32-bit indices");
            IndexBuffer::U32(indices)
        }
    }
}
