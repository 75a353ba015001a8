//! Field catalogs for the reference stencils.
//!
//! Each stencil family declares against its own catalog; the `FieldId`
//! constants index the matching `fields()` vector.

use floe_core::{FieldDef, FieldId, Location};

/// Catalog for [`staged_cell_gather`](crate::staged_cell_gather):
/// vertex-located coefficients, cell-located input and output, and an
/// explicit vertex temporary.
pub mod staged {
    use super::*;

    /// Smagorinsky diffusion coefficient, per vertex and level.
    pub const KH_SMAG_E: FieldId = FieldId(0);
    /// Inverse dual edge length, per vertex.
    pub const INV_DUAL_EDGE_LENGTH: FieldId = FieldId(1);
    /// Virtual potential temperature, per cell and level.
    pub const THETA_V: FieldId = FieldId(2);
    /// Gathered output, per cell and level.
    pub const Z_TEMP: FieldId = FieldId(3);
    /// Intermediate vertex gather of `theta_v`.
    pub const TMP: FieldId = FieldId(4);

    /// The five field definitions, in constant order.
    pub fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::column("kh_smag_e", Location::Vertex),
            FieldDef::surface("inv_dual_edge_length", Location::Vertex).with_units("m-1"),
            FieldDef::column("theta_v", Location::Cell).with_units("K"),
            FieldDef::column("z_temp", Location::Cell),
            FieldDef::column("tmp", Location::Vertex),
        ]
    }
}

/// Catalog for [`nested_vertex_gather`](crate::nested_vertex_gather):
/// cell-located coefficients, vertex-located input and output, no
/// temporary.
pub mod nested {
    use super::*;

    /// Smagorinsky diffusion coefficient, per cell and level.
    pub const KH_SMAG_E: FieldId = FieldId(0);
    /// Inverse dual edge length, per cell.
    pub const INV_DUAL_EDGE_LENGTH: FieldId = FieldId(1);
    /// Virtual potential temperature, per vertex and level.
    pub const THETA_V: FieldId = FieldId(2);
    /// Gathered output, per vertex and level.
    pub const Z_TEMP: FieldId = FieldId(3);

    /// The four field definitions, in constant order.
    pub fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::column("kh_smag_e", Location::Cell),
            FieldDef::surface("inv_dual_edge_length", Location::Cell).with_units("m-1"),
            FieldDef::column("theta_v", Location::Vertex).with_units("K"),
            FieldDef::column("z_temp", Location::Vertex),
        ]
    }
}

/// Catalog for [`edge_cell_vertex`](crate::edge_cell_vertex): vertex
/// input gathered through cells onto edges.
pub mod chain {
    use super::*;

    /// Input field, per vertex and level.
    pub const IN_FIELD: FieldId = FieldId(0);
    /// Gathered output, per edge and level.
    pub const OUT_FIELD: FieldId = FieldId(1);

    /// The two field definitions, in constant order.
    pub fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef::column("in_field", Location::Vertex),
            FieldDef::column("out_field", Location::Edge),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::VerticalExtent;

    #[test]
    fn catalogs_match_their_constants() {
        let staged = staged::fields();
        assert_eq!(staged.len(), 5);
        assert_eq!(staged[staged::TMP.0 as usize].name, "tmp");
        assert_eq!(
            staged[staged::INV_DUAL_EDGE_LENGTH.0 as usize].extent,
            VerticalExtent::Surface
        );

        let nested = nested::fields();
        assert_eq!(nested.len(), 4);
        assert_eq!(nested[nested::THETA_V.0 as usize].location, Location::Vertex);

        let chain = chain::fields();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[chain::OUT_FIELD.0 as usize].location, Location::Edge);
    }
}
