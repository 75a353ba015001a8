//! Smagorinsky-family gather chains over the vertex/cell connectivity.
//!
//! Both stencils scale a gathered temperature by the diffusion
//! coefficient and the inverse dual edge length across the nudging-to-
//! halo zone. The staged form routes the intermediate gather through an
//! explicit vertex temporary; the nested form expresses the whole chain
//! as one nested reduction.

use crate::fields::{nested, staged};
use floe_core::Location;
use floe_mesh::Marker;
use floe_stencil::{assign, field, sum_over, StencilBuilder, StencilDef};

/// Staged cell gather: materialize the vertex gather of `theta_v` in a
/// temporary, then gather the scaled temporary back onto cells.
///
/// ```text
/// tmp[v]    = Σ_{c ∈ v} theta_v[c]
/// z_temp[c] = Σ_{v ∈ c} kh_smag_e[v] * inv_dual_edge_length[v] * tmp[v]
/// ```
///
/// Declared against [`fields::staged`](crate::fields::staged).
pub fn staged_cell_gather() -> StencilDef {
    StencilBuilder::new("staged_cell_gather")
        .temporary(staged::TMP)
        .upward_across(
            Marker::Nudging,
            Marker::Halo,
            vec![
                assign(
                    staged::TMP,
                    sum_over(
                        Location::Vertex.over(Location::Cell),
                        field(staged::THETA_V),
                    ),
                ),
                assign(
                    staged::Z_TEMP,
                    sum_over(
                        Location::Cell.over(Location::Vertex),
                        field(staged::KH_SMAG_E)
                            * field(staged::INV_DUAL_EDGE_LENGTH)
                            * field(staged::TMP),
                    ),
                ),
            ],
        )
        .build()
}

/// Nested vertex gather: the cell gather of `theta_v` stays inside the
/// outer reduction.
///
/// ```text
/// z_temp[v] = Σ_{c ∈ v} kh_smag_e[c] * inv_dual_edge_length[c] * Σ_{v' ∈ c} theta_v[v']
/// ```
///
/// Declared against [`fields::nested`](crate::fields::nested).
pub fn nested_vertex_gather() -> StencilDef {
    StencilBuilder::new("nested_vertex_gather")
        .upward_across(
            Marker::Nudging,
            Marker::Halo,
            vec![assign(
                nested::Z_TEMP,
                sum_over(
                    Location::Vertex.over(Location::Cell),
                    field(nested::KH_SMAG_E)
                        * field(nested::INV_DUAL_EDGE_LENGTH)
                        * sum_over(
                            Location::Cell.over(Location::Vertex),
                            field(nested::THETA_V),
                        ),
                ),
            )],
        )
        .build()
}
