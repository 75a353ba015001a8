//! Compilation of validated stencils against a mesh.
//!
//! [`compile`] runs once at program construction. It resolves each
//! statement's horizontal iteration range from its target location's
//! domain markers and checks that the mesh carries every connectivity
//! the stencil reduces over, so the per-level hot path never revalidates.

use crate::error::PlanError;
use floe_core::{Connectivity, FieldDef, FieldId, MeshInstanceId, VerticalExtent};
use floe_mesh::Mesh;
use floe_stencil::{StencilDef, VerticalDirection};
use std::ops::Range;

/// A statement with its iteration range resolved.
#[derive(Clone, Debug)]
pub struct CompiledStmt {
    /// The written field.
    pub target: FieldId,
    /// Horizontal element range, resolved from the target location's
    /// domain and the block interval.
    pub range: Range<u32>,
    /// The assigned expression (unchanged from the definition).
    pub value: floe_stencil::Expr,
    /// Relations the expression reduces over, deduplicated.
    pub conns: Vec<Connectivity>,
    /// Whether the target is a surface field (executed for a single
    /// level instead of per level).
    pub surface_target: bool,
}

/// A block with compiled statements.
#[derive(Clone, Debug)]
pub struct CompiledBlock {
    /// Level traversal order.
    pub direction: VerticalDirection,
    /// Compiled statements, in declaration order.
    pub stmts: Vec<CompiledStmt>,
}

/// A stencil compiled against one mesh instance.
#[derive(Clone, Debug)]
pub struct CompiledStencil {
    /// Stencil name, for metrics and errors.
    pub name: String,
    /// Compiled blocks, in declaration order.
    pub blocks: Vec<CompiledBlock>,
    /// The mesh this plan was compiled against.
    pub mesh_instance: MeshInstanceId,
}

/// Compile a validated stencil against a mesh.
///
/// Expects [`validate`](floe_stencil::validate) to have passed; location
/// and vertical checks are not repeated here.
pub fn compile(
    def: &StencilDef,
    fields: &[FieldDef],
    mesh: &dyn Mesh,
) -> Result<CompiledStencil, PlanError> {
    let mut blocks = Vec::with_capacity(def.blocks.len());
    for block in &def.blocks {
        let mut stmts = Vec::with_capacity(block.stmts.len());
        for stmt in &block.stmts {
            let target_def =
                fields
                    .get(stmt.target.0 as usize)
                    .ok_or_else(|| PlanError::UnknownField {
                        stencil: def.name.clone(),
                        field: stmt.target,
                    })?;

            let mut conns = Vec::new();
            stmt.value.collect_connectivities(&mut conns);
            let mut deduped: Vec<Connectivity> = Vec::with_capacity(conns.len());
            for conn in conns {
                if !deduped.contains(&conn) {
                    deduped.push(conn);
                }
            }
            for conn in &deduped {
                if mesh.connectivity(*conn).is_none() {
                    return Err(PlanError::MissingConnectivity {
                        stencil: def.name.clone(),
                        conn: *conn,
                    });
                }
            }

            let range = mesh.domain(target_def.location).resolve(block.interval);
            stmts.push(CompiledStmt {
                target: stmt.target,
                range,
                value: stmt.value.clone(),
                conns: deduped,
                surface_target: target_def.extent == VerticalExtent::Surface,
            });
        }
        blocks.push(CompiledBlock {
            direction: block.direction,
            stmts,
        });
    }

    Ok(CompiledStencil {
        name: def.name.clone(),
        blocks,
        mesh_instance: mesh.instance_id(),
    })
}
