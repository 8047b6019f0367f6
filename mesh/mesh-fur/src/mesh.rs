//! Source and expanded mesh types.
//!
//! Both meshes use a structure-of-arrays layout: one buffer per attribute,
//! index-aligned, with triangles stored as a flat index list. This matches
//! what a renderer uploads, so the expanded buffers can be handed over
//! without repacking.
//!
//! # Expanded Layout
//!
//! For `V` source vertices, `T` source triangles and `S` shells:
//!
//! - vertex `s*V + i` is source vertex `i` on shell `s`
//! - index slots `3*(s*T + t) .. 3*(s*T + t) + 3` are triangle `t` on shell
//!   `s`, re-based by `s*V`

use std::ops::Range;

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FurError, FurResult};

/// RGBA vertex color with `f32` components.
pub type ShellColor = [f32; 4];

/// Largest vertex count addressable with 16-bit indices.
pub const U16_VERTEX_LIMIT: usize = u16::MAX as usize;

/// A triangle mesh to grow shells from.
///
/// Attribute buffers are guaranteed to have one entry per vertex and the
/// index list is guaranteed to hold whole triangles. Index values are not
/// range-checked; see [`SourceMesh::first_out_of_range_index`].
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMesh {
    vertices: Vec<Point3<f32>>,
    normals: Vec<Vector3<f32>>,
    uvs: Vec<Vector2<f32>>,
    triangles: Vec<u32>,
}

impl SourceMesh {
    /// Create a source mesh from its attribute buffers.
    ///
    /// # Errors
    ///
    /// Returns [`FurError::MalformedMesh`] if `normals` or `uvs` differ in
    /// length from `vertices`, or if `triangles.len()` is not a multiple
    /// of 3.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_fur::SourceMesh;
    /// use nalgebra::{Point3, Vector2, Vector3};
    ///
    /// let mesh = SourceMesh::new(
    ///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
    ///     vec![Vector3::z(); 3],
    ///     vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0)],
    ///     vec![0, 1, 2],
    /// )
    /// .unwrap();
    /// assert_eq!(mesh.triangle_count(), 1);
    /// ```
    pub fn new(
        vertices: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        uvs: Vec<Vector2<f32>>,
        triangles: Vec<u32>,
    ) -> FurResult<Self> {
        let v = vertices.len();
        if normals.len() != v {
            return Err(FurError::malformed_mesh(format!(
                "normals length {}, expected {v}",
                normals.len()
            )));
        }
        if uvs.len() != v {
            return Err(FurError::malformed_mesh(format!(
                "uvs length {}, expected {v}",
                uvs.len()
            )));
        }
        if triangles.len() % 3 != 0 {
            return Err(FurError::malformed_mesh(format!(
                "triangle index count {} is not a multiple of 3",
                triangles.len()
            )));
        }
        Ok(Self {
            vertices,
            normals,
            uvs,
            triangles,
        })
    }

    /// Create a source mesh that has no UV channel.
    ///
    /// Every vertex gets a zero UV.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SourceMesh::new`].
    pub fn without_uvs(
        vertices: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        triangles: Vec<u32>,
    ) -> FurResult<Self> {
        let uvs = vec![Vector2::zeros(); vertices.len()];
        Self::new(vertices, normals, uvs, triangles)
    }

    /// Number of vertices (`V`).
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles (`T`).
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Check if the mesh has no vertices or no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.triangles.is_empty()
    }

    /// Vertex positions.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point3<f32>] {
        &self.vertices
    }

    /// Per-vertex normals, assumed unit length.
    #[inline]
    #[must_use]
    pub fn normals(&self) -> &[Vector3<f32>] {
        &self.normals
    }

    /// Per-vertex texture coordinates.
    #[inline]
    #[must_use]
    pub fn uvs(&self) -> &[Vector2<f32>] {
        &self.uvs
    }

    /// Flat triangle index list.
    #[inline]
    #[must_use]
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    /// Triangle `t` as a vertex index triple.
    #[must_use]
    pub fn face(&self, t: usize) -> Option<[u32; 3]> {
        self.triangles
            .get(3 * t..3 * t + 3)
            .map(|f| [f[0], f[1], f[2]])
    }

    /// First triangle index that does not reference a vertex.
    ///
    /// Returns `(slot, index)`. Expansion does not repair such meshes.
    #[must_use]
    pub fn first_out_of_range_index(&self) -> Option<(usize, u32)> {
        let v = self.vertices.len();
        self.triangles
            .iter()
            .enumerate()
            .find(|(_, &idx)| idx as usize >= v)
            .map(|(slot, &idx)| (slot, idx))
    }
}

/// Create a unit quad in the XY plane with +Z normals.
///
/// Four vertices, two CCW triangles, UVs spanning `[0, 1]`.
///
/// # Example
///
/// ```
/// use mesh_fur::unit_quad;
///
/// let quad = unit_quad();
/// assert_eq!(quad.vertex_count(), 4);
/// assert_eq!(quad.triangle_count(), 2);
/// ```
#[must_use]
pub fn unit_quad() -> SourceMesh {
    SourceMesh {
        vertices: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        normals: vec![Vector3::z(); 4],
        uvs: vec![
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.0, 1.0),
        ],
        triangles: vec![0, 1, 2, 0, 2, 3],
    }
}

/// Storage width of mesh indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IndexWidth {
    /// 16-bit indices.
    U16,
    /// 32-bit indices.
    U32,
}

impl IndexWidth {
    /// Bytes per index.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            Self::U16 => 2,
            Self::U32 => 4,
        }
    }

    /// Narrowest width that can address `vertex_count` vertices.
    #[must_use]
    pub const fn for_vertex_count(vertex_count: usize) -> Self {
        if vertex_count > U16_VERTEX_LIMIT {
            Self::U32
        } else {
            Self::U16
        }
    }
}

impl std::fmt::Display for IndexWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::U16 => write!(f, "u16"),
            Self::U32 => write!(f, "u32"),
        }
    }
}

/// Triangle indices in their storage width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexBuffer {
    /// 16-bit index storage.
    U16(Vec<u16>),
    /// 32-bit index storage.
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Storage width.
    #[must_use]
    pub const fn width(&self) -> IndexWidth {
        match self {
            Self::U16(_) => IndexWidth::U16,
            Self::U32(_) => IndexWidth::U32,
        }
    }

    /// Number of indices.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    /// Check if the buffer holds no indices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index at `slot`, widened to `u32`.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<u32> {
        match self {
            Self::U16(v) => v.get(slot).map(|&i| u32::from(i)),
            Self::U32(v) => v.get(slot).copied(),
        }
    }

    /// Indices in `range`, widened to `u32`.
    ///
    /// Returns `None` if the range is out of bounds.
    #[must_use]
    pub fn range_u32(&self, range: Range<usize>) -> Option<Vec<u32>> {
        match self {
            Self::U16(v) => v
                .get(range)
                .map(|s| s.iter().map(|&i| u32::from(i)).collect()),
            Self::U32(v) => v.get(range).map(<[u32]>::to_vec),
        }
    }

    /// All indices widened to `u32`.
    #[must_use]
    pub fn to_u32_vec(&self) -> Vec<u32> {
        match self {
            Self::U16(v) => v.iter().map(|&i| u32::from(i)).collect(),
            Self::U32(v) => v.clone(),
        }
    }
}

/// A shell mesh: every shell's vertices and triangles concatenated.
///
/// Built fresh on every generation; see the module docs for the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedMesh {
    /// Vertex positions, `V * S` entries.
    pub positions: Vec<Point3<f32>>,
    /// Vertex normals, shell-duplicated, `V * S` entries.
    pub normals: Vec<Vector3<f32>>,
    /// Texture coordinates, shell-duplicated, `V * S` entries.
    pub uvs: Vec<Vector2<f32>>,
    /// Vertex colors, reserved and zero-filled, `V * S` entries.
    pub colors: Vec<ShellColor>,
    /// Triangle indices, `3 * T * S` entries.
    pub indices: IndexBuffer,
    shell_count: u32,
    vertices_per_shell: usize,
    triangles_per_shell: usize,
}

impl ExpandedMesh {
    #[allow(clippy::too_many_arguments)]
    pub(crate) const fn from_parts(
        positions: Vec<Point3<f32>>,
        normals: Vec<Vector3<f32>>,
        uvs: Vec<Vector2<f32>>,
        colors: Vec<ShellColor>,
        indices: IndexBuffer,
        shell_count: u32,
        vertices_per_shell: usize,
        triangles_per_shell: usize,
    ) -> Self {
        Self {
            positions,
            normals,
            uvs,
            colors,
            indices,
            shell_count,
            vertices_per_shell,
            triangles_per_shell,
        }
    }

    /// Total vertex count.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Total triangle count.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index storage width.
    #[inline]
    #[must_use]
    pub const fn index_width(&self) -> IndexWidth {
        self.indices.width()
    }

    /// Number of shells.
    #[inline]
    #[must_use]
    pub const fn shell_count(&self) -> u32 {
        self.shell_count
    }

    /// Source vertex count (`V`).
    #[inline]
    #[must_use]
    pub const fn vertices_per_shell(&self) -> usize {
        self.vertices_per_shell
    }

    /// Source triangle count (`T`).
    #[inline]
    #[must_use]
    pub const fn triangles_per_shell(&self) -> usize {
        self.triangles_per_shell
    }

    fn vertex_range(&self, shell: u32) -> Option<Range<usize>> {
        (shell < self.shell_count).then(|| {
            let start = shell as usize * self.vertices_per_shell;
            start..start + self.vertices_per_shell
        })
    }

    /// Positions of shell `shell`.
    #[must_use]
    pub fn shell_positions(&self, shell: u32) -> Option<&[Point3<f32>]> {
        self.vertex_range(shell)
            .and_then(|r| self.positions.get(r))
    }

    /// Normals of shell `shell`.
    #[must_use]
    pub fn shell_normals(&self, shell: u32) -> Option<&[Vector3<f32>]> {
        self.vertex_range(shell).and_then(|r| self.normals.get(r))
    }

    /// UVs of shell `shell`.
    #[must_use]
    pub fn shell_uvs(&self, shell: u32) -> Option<&[Vector2<f32>]> {
        self.vertex_range(shell).and_then(|r| self.uvs.get(r))
    }

    /// Triangle indices of shell `shell`, widened to `u32`.
    #[must_use]
    pub fn shell_indices(&self, shell: u32) -> Option<Vec<u32>> {
        if shell >= self.shell_count {
            return None;
        }
        let per_shell = 3 * self.triangles_per_shell;
        let start = shell as usize * per_shell;
        self.indices.range_u32(start..start + per_shell)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn source_mesh_rejects_normal_mismatch() {
        let result = SourceMesh::new(
            vec![Point3::origin(); 3],
            vec![Vector3::z(); 2],
            vec![Vector2::zeros(); 3],
            vec![0, 1, 2],
        );
        assert!(matches!(result, Err(FurError::MalformedMesh(_))));
    }

    #[test]
    fn source_mesh_rejects_uv_mismatch() {
        let result = SourceMesh::new(
            vec![Point3::origin(); 3],
            vec![Vector3::z(); 3],
            vec![Vector2::zeros(); 4],
            vec![0, 1, 2],
        );
        assert!(matches!(result, Err(FurError::MalformedMesh(_))));
    }

    #[test]
    fn source_mesh_rejects_partial_triangle() {
        let result = SourceMesh::without_uvs(
            vec![Point3::origin(); 3],
            vec![Vector3::z(); 3],
            vec![0, 1],
        );
        assert!(matches!(result, Err(FurError::MalformedMesh(_))));
    }

    #[test]
    fn source_mesh_without_uvs_fills_zero() {
        let mesh = SourceMesh::without_uvs(
            vec![Point3::origin(); 3],
            vec![Vector3::z(); 3],
            vec![0, 1, 2],
        )
        .unwrap();
        assert_eq!(mesh.uvs().len(), 3);
        assert!(mesh.uvs().iter().all(|uv| *uv == Vector2::zeros()));
    }

    #[test]
    fn source_mesh_face_access() {
        let quad = unit_quad();
        assert_eq!(quad.face(0), Some([0, 1, 2]));
        assert_eq!(quad.face(1), Some([0, 2, 3]));
        assert_eq!(quad.face(2), None);
        assert!(!quad.is_empty());
    }

    #[test]
    fn first_out_of_range_index() {
        assert_eq!(unit_quad().first_out_of_range_index(), None);

        let bad = SourceMesh::without_uvs(
            vec![Point3::origin(); 3],
            vec![Vector3::z(); 3],
            vec![0, 1, 2, 2, 7, 1],
        )
        .unwrap();
        assert_eq!(bad.first_out_of_range_index(), Some((4, 7)));
    }

    #[test]
    fn index_width_threshold() {
        assert_eq!(IndexWidth::for_vertex_count(0), IndexWidth::U16);
        assert_eq!(IndexWidth::for_vertex_count(65_535), IndexWidth::U16);
        assert_eq!(IndexWidth::for_vertex_count(65_536), IndexWidth::U32);
        assert_eq!(IndexWidth::U16.bytes(), 2);
        assert_eq!(IndexWidth::U32.bytes(), 4);
        assert_eq!(format!("{}", IndexWidth::U16), "u16");
    }

    #[test]
    fn index_buffer_widening() {
        let buf = IndexBuffer::U16(vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(buf.width(), IndexWidth::U16);
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.get(4), Some(4));
        assert_eq!(buf.get(6), None);
        assert_eq!(buf.range_u32(3..6), Some(vec![3, 4, 5]));
        assert_eq!(buf.range_u32(3..7), None);
        assert_eq!(buf.to_u32_vec(), vec![0, 1, 2, 3, 4, 5]);

        let empty = IndexBuffer::U32(Vec::new());
        assert!(empty.is_empty());
    }
}
