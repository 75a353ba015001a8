//! Edge-output gather chain.

use crate::fields::chain;
use floe_core::Location;
use floe_mesh::Marker;
use floe_stencil::{assign, field, sum_over, StencilBuilder, StencilDef};

/// Gather a vertex field through cells onto edges:
///
/// ```text
/// out_field[e] = Σ_{c ∈ e} Σ_{v ∈ c} in_field[v]
/// ```
///
/// The depth-2 chain makes the lowering strategies diverge the most: the
/// sequential form materializes one full cell-sized intermediate per
/// level, while the inlined form re-evaluates the inner gather for every
/// adjacent cell of every edge.
///
/// Declared against [`fields::chain`](crate::fields::chain).
pub fn edge_cell_vertex() -> StencilDef {
    StencilBuilder::new("edge_cell_vertex")
        .upward_across(
            Marker::Nudging,
            Marker::Halo,
            vec![assign(
                chain::OUT_FIELD,
                sum_over(
                    Location::Edge.over(Location::Cell),
                    sum_over(Location::Cell.over(Location::Vertex), field(chain::IN_FIELD)),
                ),
            )],
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_engine::{Lowering, Parallelism, ProgramConfig, StencilProgram};
    use floe_stencil::validate;
    use floe_test_utils::twin_triangle_mesh;

    #[test]
    fn declaration_validates() {
        let info = validate(&edge_cell_vertex(), &chain::fields()).unwrap();
        assert!(info.reads.contains(chain::IN_FIELD));
        assert!(info.writes.contains(chain::OUT_FIELD));
    }

    #[test]
    fn edge_gather_hand_computed() {
        let mut program = StencilProgram::new(ProgramConfig {
            mesh: Box::new(twin_triangle_mesh()),
            fields: chain::fields(),
            stencils: vec![edge_cell_vertex()],
            num_levels: 1,
            lowering: Lowering::Inlined,
            parallelism: Parallelism::Serial,
        })
        .unwrap();

        program
            .field_mut(chain::IN_FIELD)
            .unwrap()
            .copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        program.run().unwrap();

        // cell sums: c0 = 1+2+3 = 6, c1 = 1+3+4 = 8
        // e0..e4 adjacency: {c0}, {c0}, {c0,c1}, {c1}, {c1}
        assert_eq!(
            program.field(chain::OUT_FIELD).unwrap(),
            &[6.0, 6.0, 14.0, 8.0, 8.0]
        );
    }
}
