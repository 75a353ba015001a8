//! Unstructured mesh topology for Floe stencil programs.
//!
//! This crate defines the [`Mesh`] trait — the topological abstraction
//! stencil execution flows through — along with CSR neighbor tables,
//! horizontal domain markers, the explicit [`TriMesh`] backend, and a
//! structured triangle-grid generator.
//!
//! # Backends
//!
//! - [`TriMesh`]: general unstructured triangle mesh built from explicit
//!   connectivity tables via [`TriMeshBuilder`]
//! - [`equilateral_mesh`]: generated rows×cols triangle lattice with the
//!   six canonical connectivity tables
//!
//! # Horizontal domains
//!
//! The horizontal index space of each element kind is partitioned by five
//! ordered markers (lateral boundary, nudging, interior, halo, end).
//! Stencil blocks restrict iteration to a [`DomainInterval`] between two
//! markers, resolved per location by [`HorizontalDomain::resolve`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod csr;
pub mod domain;
pub mod equilateral;
pub mod error;
pub mod mesh;
pub mod tri;

pub use csr::CsrTable;
pub use domain::{DomainInterval, HorizontalDomain, Marker};
pub use equilateral::equilateral_mesh;
pub use error::MeshError;
pub use mesh::Mesh;
pub use tri::{TriMesh, TriMeshBuilder};
