//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a field within a field catalog.
///
/// Fields are registered in a catalog (a `Vec<FieldDef>`) and addressed
/// by position: `FieldId(n)` is the n-th entry of the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FieldId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`MeshInstanceId`] allocation.
static MESH_INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a mesh object.
///
/// Allocated from a monotonic atomic counter via [`MeshInstanceId::next`].
/// Two distinct mesh instances always have different IDs, even when their
/// topology is identical. Compiled execution plans record the instance ID
/// of the mesh they were built against so that running a plan on a
/// different mesh is detected instead of silently reading wrong tables.
///
/// Cloning a mesh preserves its instance ID, which is correct because
/// immutable meshes with the same ID have the same topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshInstanceId(u64);

impl MeshInstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(MESH_INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MeshInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
