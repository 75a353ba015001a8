//! Compare the inlined and sequential lowerings of the nested gather:
//! run both repeatedly, report mean ± standard deviation, and verify the
//! outputs agree within tolerance.
//!
//! ```text
//! cargo run --release -p floe-bench --example compare_lowerings
//! ```

use floe_bench::reference_profile;
use floe_core::FieldId;
use floe_engine::{
    stats::Summary, verify, Lowering, Parallelism, StencilProgram, DEFAULT_TOLERANCE,
};
use floe_stencils::fields::nested;
use floe_test_utils::fill_random;

const NUM_RUNS: usize = 20;
const SEED: u64 = 0x1CE;

fn prepared(lowering: Lowering) -> StencilProgram {
    let mut program = StencilProgram::new(reference_profile(lowering, Parallelism::Serial))
        .expect("program builds");
    for (i, field) in [
        nested::KH_SMAG_E,
        nested::INV_DUAL_EDGE_LENGTH,
        nested::THETA_V,
    ]
    .into_iter()
    .enumerate()
    {
        let buf = program.field_mut(field).expect("input field");
        let mut data = vec![0.0; buf.len()];
        fill_random(&mut data, SEED + i as u64);
        buf.copy_from_slice(&data);
    }
    program
}

fn time_runs(program: &mut StencilProgram) -> Vec<f64> {
    (0..NUM_RUNS)
        .map(|_| program.run().expect("run").total_us as f64 / 1000.0)
        .collect()
}

fn main() {
    let mut inlined = prepared(Lowering::Inlined);
    let mut sequential = prepared(Lowering::Sequential);

    let inlined_times = time_runs(&mut inlined);
    let sequential_times = time_runs(&mut sequential);

    let inl = Summary::from_samples(&inlined_times);
    let seq = Summary::from_samples(&sequential_times);
    println!(
        "V > C > V: seq {:.3} ms ± {:.3} | inl {:.3} ms ± {:.3} ({} runs)",
        seq.mean, seq.std_dev, inl.mean, inl.std_dev, NUM_RUNS
    );

    let output: FieldId = nested::Z_TEMP;
    match verify(
        inlined.field(output).expect("output"),
        sequential.field(output).expect("output"),
        DEFAULT_TOLERANCE,
    ) {
        Ok(()) => println!("verification passed"),
        Err(e) => {
            eprintln!("[FAIL] verification failed: {e}");
            std::process::exit(1);
        }
    }
}
