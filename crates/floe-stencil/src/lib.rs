//! Stencil declarations for the Floe engine.
//!
//! A stencil is a named sequence of domain-scoped assignments over mesh
//! fields, built from a small expression language: field reads, arithmetic,
//! and [`sum_over`] neighbor reductions across mesh connectivities. The
//! expression type overloads the arithmetic operators, so declarations read
//! close to the mathematical form:
//!
//! ```
//! use floe_core::{FieldDef, FieldId, Location};
//! use floe_mesh::Marker;
//! use floe_stencil::{assign, field, sum_over, validate, StencilBuilder};
//!
//! const THETA_V: FieldId = FieldId(0);
//! const TMP: FieldId = FieldId(1);
//!
//! let fields = vec![
//!     FieldDef::column("theta_v", Location::Cell),
//!     FieldDef::column("tmp", Location::Vertex),
//! ];
//!
//! let def = StencilBuilder::new("gather_theta")
//!     .temporary(TMP)
//!     .upward_across(
//!         Marker::Nudging,
//!         Marker::Halo,
//!         vec![assign(
//!             TMP,
//!             sum_over(Location::Vertex.over(Location::Cell), field(THETA_V)),
//!         )],
//!     )
//!     .build();
//!
//! let info = validate(&def, &fields).unwrap();
//! assert!(info.reads.contains(THETA_V));
//! ```
//!
//! Declarations are plain data; [`validate`] type-checks locations and
//! vertical extents against a field catalog and derives the read/write
//! sets the engine plans with.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ast;
pub mod builder;
pub mod validate;

pub use ast::{
    assign, field, lit, sum_over, BinOp, DomainBlock, Expr, StencilDef, Stmt, VerticalDirection,
};
pub use builder::StencilBuilder;
pub use validate::{validate, StencilInfo, ValidationError};
