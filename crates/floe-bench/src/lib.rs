//! Benchmark profiles for the Floe stencil engine.
//!
//! Provides pre-built [`ProgramConfig`] profiles for benchmarks and
//! examples:
//!
//! - [`reference_profile`]: 100×100 lattice, 80 levels, nested gather
//! - [`stress_profile`]: 200×200 lattice, 80 levels, nested gather
//! - [`chain_profile`]: 100×100 lattice, 80 levels, edge gather chain

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use floe_core::Location;
use floe_engine::{Lowering, Parallelism, ProgramConfig};
use floe_mesh::{equilateral_mesh, HorizontalDomain, Mesh, TriMesh};
use floe_stencils::fields::{chain, nested};
use floe_stencils::{edge_cell_vertex, nested_vertex_gather};

/// Vertical level count shared by all profiles.
pub const NUM_LEVELS: u32 = 80;

/// Generate a lattice with nudging/interior/halo markers at 6% / 50% /
/// 94% of each location's element count, the shape of a production grid
/// with boundary and halo rows.
pub fn benchmark_mesh(rows: u32, cols: u32) -> TriMesh {
    let mut mesh = equilateral_mesh(rows, cols).expect("lattice generates");
    for location in Location::ALL {
        let count = mesh.element_count(location) as u32;
        let domain =
            HorizontalDomain::from_fractions(count, 0.06, 0.5, 0.94).expect("fractions are ordered");
        mesh = mesh.with_domain(location, domain).expect("count matches");
    }
    mesh
}

/// Reference profile: nested vertex gather on a 100×100 lattice
/// (10K vertices, ~19.6K cells) over 80 levels.
pub fn reference_profile(lowering: Lowering, parallelism: Parallelism) -> ProgramConfig {
    ProgramConfig {
        mesh: Box::new(benchmark_mesh(100, 100)),
        fields: nested::fields(),
        stencils: vec![nested_vertex_gather()],
        num_levels: NUM_LEVELS,
        lowering,
        parallelism,
    }
}

/// Stress profile: the reference workload at 4× the element count
/// (200×200 lattice).
pub fn stress_profile(lowering: Lowering, parallelism: Parallelism) -> ProgramConfig {
    ProgramConfig {
        mesh: Box::new(benchmark_mesh(200, 200)),
        fields: nested::fields(),
        stencils: vec![nested_vertex_gather()],
        num_levels: NUM_LEVELS,
        lowering,
        parallelism,
    }
}

/// Edge-chain profile: the depth-2 edge gather on a 100×100 lattice.
pub fn chain_profile(lowering: Lowering, parallelism: Parallelism) -> ProgramConfig {
    ProgramConfig {
        mesh: Box::new(benchmark_mesh(100, 100)),
        fields: chain::fields(),
        stencils: vec![edge_cell_vertex()],
        num_levels: NUM_LEVELS,
        lowering,
        parallelism,
    }
}
