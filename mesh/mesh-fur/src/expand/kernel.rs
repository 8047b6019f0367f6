//! The per-tile shell transform.

use nalgebra::{Point3, Vector2, Vector3};

use super::tile::{Tile, TriangleTile, VertexTile};
use crate::mesh::SourceMesh;
use crate::params::ShellParams;

/// Read-only view of the inputs the transform needs.
///
/// Shared by every worker; each call to [`ShellKernel::run`] reads only
/// source data and writes only its own tile.
#[derive(Debug, Clone)]
pub struct ShellKernel<'a> {
    vertices: &'a [Point3<f32>],
    normals: &'a [Vector3<f32>],
    uvs: &'a [Vector2<f32>],
    triangles: &'a [u32],
    vertex_count: u32,
    params: ShellParams,
}

impl<'a> ShellKernel<'a> {
    /// Bind the kernel to a source mesh and resolved parameters.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // callers validate V * S against u32
    pub fn new(source: &'a SourceMesh, params: &ShellParams) -> Self {
        Self {
            vertices: source.vertices(),
            normals: source.normals(),
            uvs: source.uvs(),
            triangles: source.triangles(),
            vertex_count: source.vertex_count() as u32,
            params: params.clone(),
        }
    }

    /// Run the transform over one tile.
    pub fn run(&self, tile: Tile<'_>) {
        match tile {
            Tile::Vertices(t) => self.run_vertices(t),
            Tile::Triangles(t) => self.run_triangles(t),
        }
    }

    fn run_vertices(&self, tile: VertexTile<'_>) {
        let offset = self.params.shell_offset(tile.shell);
        let range = tile.first_vertex..tile.first_vertex + tile.positions.len();

        let src = self.vertices[range.clone()]
            .iter()
            .zip(&self.normals[range.clone()])
            .zip(&self.uvs[range]);
        let dst = tile
            .positions
            .iter_mut()
            .zip(tile.normals.iter_mut())
            .zip(tile.uvs.iter_mut());

        for (((position, normal), uv), ((out_pos, out_normal), out_uv)) in src.zip(dst) {
            *out_pos = *position + *normal * offset;
            *out_normal = *normal;
            *out_uv = *uv;
        }
    }

    // Source indices are re-based as-is: an index >= V lands outside its
    // shell's block and is never used to read source data here.
    fn run_triangles(&self, tile: TriangleTile<'_>) {
        let base = tile.shell.wrapping_mul(self.vertex_count);
        let range = tile.first_slot..tile.first_slot + tile.indices.len();

        for (out, &src) in tile.indices.iter_mut().zip(&self.triangles[range]) {
            *out = base.wrapping_add(src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::unit_quad;

    #[test]
    fn vertex_tile_offsets_along_normal() {
        let quad = unit_quad();
        let params = ShellParams::new(5, 2.0);
        let kernel = ShellKernel::new(&quad, &params);

        let mut positions = vec![Point3::origin(); 2];
        let mut normals = vec![Vector3::zeros(); 2];
        let mut uvs = vec![Vector2::zeros(); 2];
        kernel.run(Tile::Vertices(VertexTile {
            shell: 2,
            first_vertex: 2,
            positions: &mut positions,
            normals: &mut normals,
            uvs: &mut uvs,
        }));

        // shell 2 of 5 over height 2.0 sits at 1.0
        assert_eq!(positions[0], Point3::new(1.0, 1.0, 1.0));
        assert_eq!(positions[1], Point3::new(0.0, 1.0, 1.0));
        assert_eq!(normals, vec![Vector3::z(); 2]);
        assert_eq!(uvs[0], Vector2::new(1.0, 1.0));
        assert_eq!(uvs[1], Vector2::new(0.0, 1.0));
    }

    #[test]
    fn triangle_tile_rebases_by_shell() {
        let quad = unit_quad();
        let params = ShellParams::new(4, 1.0);
        let kernel = ShellKernel::new(&quad, &params);

        let mut indices = vec![0; 3];
        kernel.run(Tile::Triangles(TriangleTile {
            shell: 3,
            first_slot: 3,
            indices: &mut indices,
        }));

        assert_eq!(indices, vec![12, 14, 15]);
    }
}
