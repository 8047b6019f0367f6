//! Benchmarks for mesh-fur shell expansion.
//!
//! Run with: cargo bench -p mesh-fur
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-fur -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-fur -- --baseline main

#![allow(missing_docs, clippy::cast_precision_loss)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mesh_fur::{
    generate_shell_mesh, Point3, RayonBackend, SequentialBackend, ShellMeshBuilder, ShellParams,
    SourceMesh, Vector2, Vector3,
};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create a flat `n x n` vertex grid.
fn create_grid(n: u32) -> SourceMesh {
    let mut vertices = Vec::with_capacity((n * n) as usize);
    let mut uvs = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            vertices.push(Point3::new(x as f32, y as f32, 0.0));
            uvs.push(Vector2::new(x as f32 / n as f32, y as f32 / n as f32));
        }
    }

    let mut triangles = Vec::new();
    for y in 0..n - 1 {
        for x in 0..n - 1 {
            let i = y * n + x;
            triangles.extend_from_slice(&[i, i + 1, i + n, i + 1, i + n + 1, i + n]);
        }
    }

    let normals = vec![Vector3::z(); vertices.len()];
    SourceMesh::new(vertices, normals, uvs, triangles).unwrap_or_else(|e| panic!("{e}"))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_shell_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("ShellExpansion");

    let test_cases = [
        ("grid_16", create_grid(16)),
        ("grid_64", create_grid(64)),
        ("grid_256", create_grid(256)),
    ];
    let params = ShellParams::new(32, 0.2);
    let rayon = RayonBackend::global();

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(
            (mesh.vertex_count() * params.num_shells as usize) as u64,
        ));

        group.bench_with_input(BenchmarkId::new("sequential", name), mesh, |b, mesh| {
            b.iter(|| {
                generate_shell_mesh(
                    Some(black_box(mesh)),
                    black_box(&params),
                    Some(&SequentialBackend),
                )
            });
        });

        group.bench_with_input(BenchmarkId::new("rayon", name), mesh, |b, mesh| {
            b.iter(|| generate_shell_mesh(Some(black_box(mesh)), black_box(&params), Some(&rayon)));
        });

        group.bench_with_input(BenchmarkId::new("builder_dense", name), mesh, |b, mesh| {
            b.iter(|| ShellMeshBuilder::new(black_box(mesh)).dense().build());
        });
    }

    group.finish();
}

fn bench_tile_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("TileSize");
    group.sample_size(20);

    let mesh = create_grid(128);
    let rayon = RayonBackend::global();

    for tile_size in [256, 1024, 4096, 16384] {
        let params = ShellParams::new(64, 0.2).with_tile_size(tile_size);
        group.bench_with_input(
            BenchmarkId::from_parameter(tile_size),
            &params,
            |b, params| {
                b.iter(|| generate_shell_mesh(Some(&mesh), black_box(params), Some(&rayon)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_shell_expansion, bench_tile_size);
criterion_main!(benches);
