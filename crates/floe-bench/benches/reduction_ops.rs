//! Criterion benchmarks for reduction lowering strategies.
//!
//! Times the nested gather chain under inlined and sequential lowering
//! and under level-parallel execution — the comparison the reference
//! stencils exist to make.

use criterion::{criterion_group, criterion_main, Criterion};
use floe_bench::{chain_profile, reference_profile};
use floe_core::FieldId;
use floe_engine::{Lowering, Parallelism, ProgramConfig, StencilProgram};
use floe_stencils::fields::{chain, nested};
use floe_test_utils::fill_random;
use std::hint::black_box;

fn prepared_program(config: ProgramConfig, inputs: &[FieldId]) -> StencilProgram {
    let mut program = StencilProgram::new(config).expect("benchmark program builds");
    for (i, &field) in inputs.iter().enumerate() {
        let buf = program.field_mut(field).expect("input field");
        let mut data = vec![0.0; buf.len()];
        fill_random(&mut data, 0xF10E + i as u64);
        buf.copy_from_slice(&data);
    }
    program
}

const NESTED_INPUTS: [FieldId; 3] = [
    nested::KH_SMAG_E,
    nested::INV_DUAL_EDGE_LENGTH,
    nested::THETA_V,
];

fn bench_nested_inlined(c: &mut Criterion) {
    let mut program = prepared_program(
        reference_profile(Lowering::Inlined, Parallelism::Serial),
        &NESTED_INPUTS,
    );
    c.bench_function("nested_gather_inlined_100x100x80", |b| {
        b.iter(|| {
            let metrics = program.run().expect("run");
            black_box(metrics.elements_processed);
        });
    });
}

fn bench_nested_sequential(c: &mut Criterion) {
    let mut program = prepared_program(
        reference_profile(Lowering::Sequential, Parallelism::Serial),
        &NESTED_INPUTS,
    );
    c.bench_function("nested_gather_sequential_100x100x80", |b| {
        b.iter(|| {
            let metrics = program.run().expect("run");
            black_box(metrics.elements_processed);
        });
    });
}

fn bench_nested_parallel(c: &mut Criterion) {
    let mut program = prepared_program(
        reference_profile(Lowering::Inlined, Parallelism::Levels { threads: Some(4) }),
        &NESTED_INPUTS,
    );
    c.bench_function("nested_gather_inlined_4threads_100x100x80", |b| {
        b.iter(|| {
            let metrics = program.run().expect("run");
            black_box(metrics.elements_processed);
        });
    });
}

fn bench_chain_lowerings(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_chain_100x100x80");
    for (label, lowering) in [
        ("inlined", Lowering::Inlined),
        ("sequential", Lowering::Sequential),
    ] {
        let mut program = prepared_program(
            chain_profile(lowering, Parallelism::Serial),
            &[chain::IN_FIELD],
        );
        group.bench_function(label, |b| {
            b.iter(|| {
                let metrics = program.run().expect("run");
                black_box(metrics.elements_processed);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_nested_inlined,
    bench_nested_sequential,
    bench_nested_parallel,
    bench_chain_lowerings
);
criterion_main!(benches);
