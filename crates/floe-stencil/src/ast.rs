//! Stencil expression and statement types.

use floe_core::{Connectivity, FieldId, FieldSet};
use floe_mesh::DomainInterval;
use std::ops;

/// Binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// `lhs + rhs`
    Add,
    /// `lhs - rhs`
    Sub,
    /// `lhs * rhs`
    Mul,
    /// `lhs / rhs`
    Div,
}

impl BinOp {
    /// Apply the operator to two values.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

/// A stencil expression, evaluated per element per level.
///
/// Construct with [`field`], [`lit`], [`sum_over`] and the overloaded
/// arithmetic operators rather than spelling variants out.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A floating-point constant.
    Lit(f64),
    /// Read a field at the current element and level.
    Field(FieldId),
    /// Arithmetic negation.
    Neg(Box<Expr>),
    /// Binary arithmetic on two subexpressions.
    Bin {
        /// The operator.
        op: BinOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Neighbor reduction: iterate the target elements of `conn` and sum
    /// `body` evaluated at each source neighbor.
    SumOver {
        /// The relation reduced over.
        conn: Connectivity,
        /// Source-located body, evaluated once per neighbor.
        body: Box<Expr>,
    },
}

impl Expr {
    /// Insert every field this expression reads into `set`.
    pub fn collect_fields(&self, set: &mut FieldSet) {
        match self {
            Self::Lit(_) => {}
            Self::Field(id) => set.insert(*id),
            Self::Neg(inner) => inner.collect_fields(set),
            Self::Bin { lhs, rhs, .. } => {
                lhs.collect_fields(set);
                rhs.collect_fields(set);
            }
            Self::SumOver { body, .. } => body.collect_fields(set),
        }
    }

    /// Append every connectivity this expression reduces over, outermost
    /// first, duplicates included.
    pub fn collect_connectivities(&self, out: &mut Vec<Connectivity>) {
        match self {
            Self::Lit(_) | Self::Field(_) => {}
            Self::Neg(inner) => inner.collect_connectivities(out),
            Self::Bin { lhs, rhs, .. } => {
                lhs.collect_connectivities(out);
                rhs.collect_connectivities(out);
            }
            Self::SumOver { conn, body } => {
                out.push(*conn);
                body.collect_connectivities(out);
            }
        }
    }

    /// Maximum nesting depth of reductions (0 for reduction-free).
    pub fn reduction_depth(&self) -> usize {
        match self {
            Self::Lit(_) | Self::Field(_) => 0,
            Self::Neg(inner) => inner.reduction_depth(),
            Self::Bin { lhs, rhs, .. } => lhs.reduction_depth().max(rhs.reduction_depth()),
            Self::SumOver { body, .. } => 1 + body.reduction_depth(),
        }
    }
}

/// Read a field at the current element and level.
pub fn field(id: FieldId) -> Expr {
    Expr::Field(id)
}

/// A floating-point constant.
pub fn lit(value: f64) -> Expr {
    Expr::Lit(value)
}

/// Reduce `body` over the neighbors of `conn`.
///
/// `sum_over(Location::Vertex.over(Location::Cell), field(THETA_V))`
/// iterates vertices and sums `theta_v` at each adjacent cell. An empty
/// neighbor row yields `0.0`.
pub fn sum_over(conn: Connectivity, body: Expr) -> Expr {
    Expr::SumOver {
        conn,
        body: Box::new(body),
    }
}

impl ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::Bin {
            op: BinOp::Add,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }
}

impl ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Bin {
            op: BinOp::Sub,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }
}

impl ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::Bin {
            op: BinOp::Mul,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }
}

impl ops::Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::Bin {
            op: BinOp::Div,
            lhs: Box::new(self),
            rhs: Box::new(rhs),
        }
    }
}

impl ops::Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}

/// A single assignment: evaluate `value` for every element in the
/// enclosing block's range and store it into `target`.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    /// The written field.
    pub target: FieldId,
    /// The assigned expression.
    pub value: Expr,
}

/// Assign `value` to `target`.
pub fn assign(target: FieldId, value: Expr) -> Stmt {
    Stmt { target, value }
}

/// Vertical traversal order of a domain block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalDirection {
    /// Surface to top: levels `0, 1, ..`.
    Upward,
    /// Top to surface: levels `.., 1, 0`.
    Downward,
}

/// A run of statements scoped to a horizontal interval and a vertical
/// traversal direction.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainBlock {
    /// Level traversal order.
    pub direction: VerticalDirection,
    /// Horizontal interval, resolved per target location at compile time.
    pub interval: DomainInterval,
    /// Statements, executed in order within each level.
    pub stmts: Vec<Stmt>,
}

/// A named stencil: temporaries plus domain-scoped assignment blocks.
///
/// Plain data; type-checked by [`validate`](crate::validate::validate)
/// against a field catalog and compiled by the engine against a mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct StencilDef {
    /// Name used in error reporting and metrics.
    pub name: String,
    /// Fields internal to this stencil; the engine treats them as
    /// scratch state, not program inputs or outputs.
    pub temporaries: Vec<FieldId>,
    /// The stencil body.
    pub blocks: Vec<DomainBlock>,
}
