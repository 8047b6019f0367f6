//! Disjoint work tiles over the expanded output buffers.
//!
//! A tile owns a mutable slice of exactly one shell's block in one output
//! buffer family, so no two tiles can alias an output slot.

use nalgebra::{Point3, Vector2, Vector3};

/// A run of one shell's vertex block across all vertex attribute buffers.
#[derive(Debug)]
pub struct VertexTile<'a> {
    /// Shell this tile belongs to.
    pub shell: u32,
    /// Source vertex index of the first entry in the slices.
    pub first_vertex: usize,
    /// Output positions.
    pub positions: &'a mut [Point3<f32>],
    /// Output normals.
    pub normals: &'a mut [Vector3<f32>],
    /// Output texture coordinates.
    pub uvs: &'a mut [Vector2<f32>],
}

/// A run of one shell's index block.
#[derive(Debug)]
pub struct TriangleTile<'a> {
    /// Shell this tile belongs to.
    pub shell: u32,
    /// Slot in the source index list that maps to `indices[0]`.
    /// Always a multiple of 3.
    pub first_slot: usize,
    /// Output indices.
    pub indices: &'a mut [u32],
}

/// One independently executable unit of expansion work.
#[derive(Debug)]
pub enum Tile<'a> {
    /// Offset and copy vertex attributes.
    Vertices(VertexTile<'a>),
    /// Re-base triangle indices.
    Triangles(TriangleTile<'a>),
}

impl Tile<'_> {
    /// Shell this tile belongs to.
    #[must_use]
    pub const fn shell(&self) -> u32 {
        match self {
            Self::Vertices(t) => t.shell,
            Self::Triangles(t) => t.shell,
        }
    }

    /// Number of output elements (vertices or index slots) in the tile.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Vertices(t) => t.positions.len(),
            Self::Triangles(t) => t.indices.len(),
        }
    }

    /// Check if the tile covers no output elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split the output buffers into tiles of at most `tile_size` vertices or
/// `tile_size` triangles, never crossing a shell boundary.
///
/// `vertex_count` and `triangle_count` are per shell. `tile_size` must be
/// non-zero.
#[allow(clippy::cast_possible_truncation)] // shell count is bounded by MAX_SHELLS
pub(crate) fn build_tiles<'a>(
    positions: &'a mut [Point3<f32>],
    normals: &'a mut [Vector3<f32>],
    uvs: &'a mut [Vector2<f32>],
    indices: &'a mut [u32],
    vertex_count: usize,
    triangle_count: usize,
    tile_size: usize,
) -> Vec<Tile<'a>> {
    let mut tiles = Vec::new();

    if vertex_count > 0 {
        let shells = positions
            .chunks_mut(vertex_count)
            .zip(normals.chunks_mut(vertex_count))
            .zip(uvs.chunks_mut(vertex_count));

        for (shell, ((p, n), uv)) in shells.enumerate() {
            let runs = p
                .chunks_mut(tile_size)
                .zip(n.chunks_mut(tile_size))
                .zip(uv.chunks_mut(tile_size));

            for (k, ((positions, normals), uvs)) in runs.enumerate() {
                tiles.push(Tile::Vertices(VertexTile {
                    shell: shell as u32,
                    first_vertex: k * tile_size,
                    positions,
                    normals,
                    uvs,
                }));
            }
        }
    }

    if triangle_count > 0 {
        let slots_per_shell = 3 * triangle_count;
        let slots_per_tile = tile_size.saturating_mul(3);

        for (shell, block) in indices.chunks_mut(slots_per_shell).enumerate() {
            for (k, indices) in block.chunks_mut(slots_per_tile).enumerate() {
                tiles.push(Tile::Triangles(TriangleTile {
                    shell: shell as u32,
                    first_slot: k * slots_per_tile,
                    indices,
                }));
            }
        }
    }

    tiles
}
