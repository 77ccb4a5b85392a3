//! Benchmarks for circumsphere computation and containment queries.
//!
//! Compares the closed-form 2D circumcenter with the general linear-solve
//! path, and measures `insphere_distance` over many random query points.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use lifted_delaunay::geometry::util::circumsphere_2d;
use lifted_delaunay::prelude::*;
use std::hint::black_box;

/// Standard D-simplex: the origin and the unit basis vectors.
fn standard_simplex(dim: usize) -> Vec<Vec<f64>> {
    let mut pts = Vec::with_capacity(dim + 1);
    pts.push(vec![0.0; dim]);
    for i in 0..dim {
        let mut coords = vec![0.0; dim];
        coords[i] = 1.0;
        pts.push(coords);
    }
    pts
}

fn benchmark_circumsphere(c: &mut Criterion) {
    let triangle = standard_simplex(2);
    c.bench_function("circumsphere/2d_closed_form", |b| {
        b.iter(|| {
            black_box(
                circumsphere_2d(
                    black_box(&triangle[0]),
                    black_box(&triangle[1]),
                    black_box(&triangle[2]),
                )
                .unwrap(),
            )
        });
    });

    for dim in [2, 3, 4, 5] {
        let simplex = standard_simplex(dim);
        c.bench_function(&format!("circumsphere/{dim}d"), |b| {
            b.iter(|| black_box(circumsphere(black_box(&simplex)).unwrap()));
        });
    }
}

fn benchmark_random_queries(c: &mut Criterion) {
    let simplex: Vec<Vec<f64>> = generate_random_vertices_seeded(4, 3, (-10.0, 10.0), 42)
        .expect("Failed to generate random simplex points")
        .iter()
        .map(|v| v.position().to_vec())
        .collect();
    let queries = generate_random_vertices_seeded(1000, 3, (-5.0, 5.0), 123)
        .expect("Failed to generate random test points");

    c.bench_function("random/insphere_distance_1000_queries", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(insphere_distance(black_box(&simplex), black_box(q.position())).unwrap());
            }
        });
    });
}

criterion_group!(benches, benchmark_circumsphere, benchmark_random_queries);
criterion_main!(benches);
