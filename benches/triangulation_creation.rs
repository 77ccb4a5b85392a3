//! Benchmarks for batch Delaunay triangulation and Voronoi construction.
//!
//! Measures `DelaunayTriangulation::generate` and `VoronoiMesh::generate` on
//! seeded random point sets in 2D, 3D and 4D, so runs are reproducible.

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lifted_delaunay::prelude::*;
use std::hint::black_box;

const SEED: u64 = 42;

fn bench_triangulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulation_creation");
    for (dim, counts) in [(2, &[100usize, 500, 1_000][..]), (3, &[100, 500][..]), (4, &[50, 100][..])] {
        for &n in counts {
            let vertices = generate_random_vertices_seeded(n, dim, (-100.0, 100.0), SEED)
                .expect("Failed to generate random vertices");
            group.throughput(Throughput::Elements(n as u64));
            group.bench_with_input(BenchmarkId::new(format!("{dim}d"), n), &vertices, |b, vertices| {
                let mut dt: DelaunayTriangulation<DefaultVertex> = DelaunayTriangulation::new(dim);
                b.iter(|| {
                    dt.generate(black_box(vertices)).expect("triangulation failed");
                    black_box(dt.number_of_cells())
                });
            });
        }
    }
    group.finish();
}

fn bench_voronoi(c: &mut Criterion) {
    let mut group = c.benchmark_group("voronoi_creation");
    for n in [100usize, 1_000] {
        let vertices = generate_random_vertices_seeded(n, 2, (-100.0, 100.0), SEED)
            .expect("Failed to generate random vertices");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("2d", n), &vertices, |b, vertices| {
            let mut mesh: VoronoiMesh<DefaultVertex> = VoronoiMesh::new(2);
            b.iter(|| {
                mesh.generate(black_box(vertices)).expect("voronoi failed");
                black_box(mesh.edges().len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_triangulation, bench_voronoi);
criterion_main!(benches);
