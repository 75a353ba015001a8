//! Fluent construction of [`StencilDef`]s.

use crate::ast::{DomainBlock, StencilDef, Stmt, VerticalDirection};
use floe_core::FieldId;
use floe_mesh::{DomainInterval, Marker};

/// Builder for [`StencilDef`].
///
/// Mirrors the declaration order of a stencil source: name, temporaries,
/// then one block per `domain` scope.
#[derive(Debug)]
pub struct StencilBuilder {
    name: String,
    temporaries: Vec<FieldId>,
    blocks: Vec<DomainBlock>,
}

impl StencilBuilder {
    /// Start a stencil with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            temporaries: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Declare a stencil-local temporary field.
    pub fn temporary(mut self, field: FieldId) -> Self {
        self.temporaries.push(field);
        self
    }

    /// Add an upward block over `lo..hi`.
    pub fn upward_across(self, lo: Marker, hi: Marker, stmts: Vec<Stmt>) -> Self {
        self.block(VerticalDirection::Upward, DomainInterval::new(lo, hi), stmts)
    }

    /// Add a downward block over `lo..hi`.
    pub fn downward_across(self, lo: Marker, hi: Marker, stmts: Vec<Stmt>) -> Self {
        self.block(
            VerticalDirection::Downward,
            DomainInterval::new(lo, hi),
            stmts,
        )
    }

    /// Add a block with an explicit direction and interval.
    pub fn block(
        mut self,
        direction: VerticalDirection,
        interval: DomainInterval,
        stmts: Vec<Stmt>,
    ) -> Self {
        self.blocks.push(DomainBlock {
            direction,
            interval,
            stmts,
        });
        self
    }

    /// Finish the declaration.
    ///
    /// The result is unchecked; pass it to
    /// [`validate`](crate::validate::validate) before execution.
    pub fn build(self) -> StencilDef {
        StencilDef {
            name: self.name,
            temporaries: self.temporaries,
            blocks: self.blocks,
        }
    }
}
