//! Criterion micro-benchmarks for mesh topology operations.

use criterion::{criterion_group, criterion_main, Criterion};
use floe_core::Location;
use floe_mesh::{equilateral_mesh, Mesh};
use std::hint::black_box;

/// Benchmark: generate a 100x100 lattice (10K vertices, six tables).
fn bench_generate_100x100(c: &mut Criterion) {
    c.bench_function("equilateral_generate_100x100", |b| {
        b.iter(|| {
            let mesh = equilateral_mesh(100, 100).expect("generates");
            black_box(mesh.element_count(Location::Edge));
        });
    });
}

/// Benchmark: walk every vertex's cell row and sum the neighbor IDs.
fn bench_vertex_cell_rows_100x100(c: &mut Criterion) {
    let mesh = equilateral_mesh(100, 100).expect("generates");
    let table = mesh
        .connectivity(Location::Vertex.over(Location::Cell))
        .expect("table registered");

    c.bench_function("vertex_cell_rows_100x100", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for row in table.rows() {
                for &cell in row {
                    acc += cell as u64;
                }
            }
            black_box(acc);
        });
    });
}

criterion_group!(benches, bench_generate_100x100, bench_vertex_cell_rows_100x100);
criterion_main!(benches);
