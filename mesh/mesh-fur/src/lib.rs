//! Shell-mesh amplification for fur and fuzz rendering.
//!
//! Shell texturing draws a surface many times, each copy pushed a little
//! further out along the vertex normals. This crate turns one source mesh
//! into that stack of shells: `num_shells` copies of every vertex, displaced
//! by `(s / (num_shells - 1)) * total_height`, with each copy's triangles
//! re-based onto its own vertex block. Shell 0 is the source surface itself.
//!
//! The expansion is cut into independent tiles over disjoint output slots
//! and run on a [`ComputeBackend`]. [`SequentialBackend`] runs on the calling
//! thread and [`RayonBackend`] runs on a rayon pool; both produce identical
//! output.
//!
//! # Quick Start with `ShellMeshBuilder`
//!
//! ```
//! use mesh_fur::{unit_quad, ShellMeshBuilder};
//!
//! let quad = unit_quad();
//! let result = ShellMeshBuilder::new(&quad)
//!     .shells(32)
//!     .height(0.15)
//!     .build()
//!     .expect("valid parameters");
//!
//! assert_eq!(result.mesh.vertex_count(), 4 * 32);
//! assert_eq!(result.mesh.triangle_count(), 2 * 32);
//! ```
//!
//! # Low-Level API
//!
//! ```
//! use mesh_fur::{generate_shell_mesh, unit_quad, IndexWidth, SequentialBackend, ShellParams};
//!
//! let quad = unit_quad();
//! let params = ShellParams::sparse();
//! let (mesh, stats) = generate_shell_mesh(Some(&quad), &params, Some(&SequentialBackend))
//!     .expect("shell generation failed");
//!
//! assert_eq!(stats.index_width, IndexWidth::U16);
//! assert_eq!(mesh.shell_positions(0), Some(quad.vertices()));
//! ```
//!
//! # Regeneration
//!
//! [`ShellMeshGenerator`] holds the inputs for a long-lived mesh and hands
//! each rebuilt mesh to a [`MeshSink`]. Input changes take effect on the next
//! [`ShellMeshGenerator::regenerate`] call.
//!
//! # Index Width
//!
//! Indices are 16-bit while the expanded vertex count fits in 65535 and
//! 32-bit beyond that. [`IndexWidthPolicy::Always32`] forces 32-bit.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
// Shell and vertex counts are bounded by validation before any cast.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

mod assemble;
mod backend;
mod builder;
mod error;
mod expand;
mod generator;
mod mesh;
mod params;
mod pipeline;
mod validate;

pub use error::{FurError, FurResult};

// Builder API (recommended)
pub use builder::{ShellMeshBuildResult, ShellMeshBuilder};

// Parameters
pub use params::{
    IndexWidthPolicy, ShellParams, MAX_HEIGHT, MAX_SHELLS, MIN_HEIGHT, MIN_SHELLS,
};

// Mesh types
pub use mesh::{
    unit_quad, ExpandedMesh, IndexBuffer, IndexWidth, ShellColor, SourceMesh, U16_VERTEX_LIMIT,
};

// Compute backends
pub use backend::{default_backend, ComputeBackend, RayonBackend, SequentialBackend};

// Pipeline stages
pub use assemble::assemble;
pub use expand::{expand, ExpandedBuffers, ShellKernel, Tile, TriangleTile, VertexTile};
pub use pipeline::{generate_shell_mesh, ShellExpansionResult};
pub use validate::{validate, ValidatedInput};

// Regeneration lifecycle
pub use generator::{MeshSink, MeshSlot, ShellMeshGenerator};

pub use nalgebra::{Point3, Vector2, Vector3};
