//! Reference stencils for the Floe engine.
//!
//! Production-shaped stencil declarations that exercise the full
//! pipeline: staged and nested vertex/cell gather chains from the
//! Smagorinsky diffusion family, and an edge-output gather chain.
//! Each family ships a field catalog in [`fields`] and a constructor
//! returning a [`StencilDef`](floe_stencil::StencilDef) declared against
//! it.
//!
//! The staged and nested variants compute through the same connectivity
//! chain but differ in where the intermediate gather lives: the staged
//! form materializes it in an explicit vertex temporary, the nested form
//! folds it into a nested reduction. Together with the engine's two
//! lowering strategies they cover the staged-vs-inlined comparison this
//! family of kernels is benchmarked with.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fields;
pub mod gather;
pub mod smagorinsky;

pub use gather::edge_cell_vertex;
pub use smagorinsky::{nested_vertex_gather, staged_cell_gather};
