//! The core `Mesh` trait and `dyn Mesh` downcast support.

use crate::csr::CsrTable;
use crate::domain::HorizontalDomain;
use floe_core::{Connectivity, Location, MeshInstanceId};
use std::any::Any;

/// Topological abstraction stencil execution flows through.
///
/// A mesh exposes element counts per [`Location`], CSR neighbor tables
/// per [`Connectivity`], and the horizontal domain markers of each
/// location. Which connectivity tables exist is backend-defined; plan
/// compilation checks that every relation a stencil names is present.
///
/// # Object safety
///
/// The trait is designed for use as `dyn Mesh`; use
/// [`downcast_ref`](dyn Mesh::downcast_ref) for opt-in specialization on
/// concrete backends.
///
/// # Thread safety
///
/// `Sync` is required because level-parallel execution shares
/// `&dyn Mesh` across worker threads.
pub trait Mesh: Any + Send + Sync + 'static {
    /// Number of elements of the given kind.
    fn element_count(&self, location: Location) -> usize;

    /// The neighbor table for a relation, if the mesh carries it.
    fn connectivity(&self, conn: Connectivity) -> Option<&CsrTable>;

    /// Horizontal domain markers for a location.
    fn domain(&self, location: Location) -> &HorizontalDomain;

    /// Unique instance identifier for this mesh object.
    ///
    /// Compiled plans record it to detect being run against a different
    /// mesh than they were built for.
    fn instance_id(&self) -> MeshInstanceId;

    /// Returns `true` if `self` and `other` are topologically equivalent:
    /// same concrete type, element counts, tables, and domains.
    fn topology_eq(&self, other: &dyn Mesh) -> bool;
}

impl dyn Mesh {
    /// Attempt to downcast a trait object to a concrete mesh type.
    pub fn downcast_ref<T: Mesh>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}
