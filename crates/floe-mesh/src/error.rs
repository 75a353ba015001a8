//! Error types for mesh construction and queries.

use floe_core::{Connectivity, Location};
use std::fmt;

/// Errors arising from mesh construction or topology queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Attempted to build a mesh with zero elements of every kind.
    EmptyMesh,
    /// A connectivity table is inconsistent with the element counts.
    InvalidTable {
        /// The offending relation.
        conn: Connectivity,
        /// What went wrong.
        reason: String,
    },
    /// Domain markers are out of order or exceed the element count.
    InvalidMarkers {
        /// What went wrong.
        reason: String,
    },
    /// A registered domain does not match the element count of its location.
    DomainMismatch {
        /// The location whose domain is wrong.
        location: Location,
        /// The domain's end marker.
        end: u32,
        /// The actual element count.
        count: usize,
    },
    /// A mesh dimension exceeds the supported maximum.
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The requested value.
        value: u64,
        /// The supported maximum.
        max: u64,
    },
    /// A mesh dimension is below the supported minimum.
    DimensionTooSmall {
        /// Which dimension.
        name: &'static str,
        /// The requested value.
        value: u64,
        /// The supported minimum.
        min: u64,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMesh => write!(f, "mesh must have at least one element"),
            Self::InvalidTable { conn, reason } => {
                write!(f, "invalid {conn} table: {reason}")
            }
            Self::InvalidMarkers { reason } => write!(f, "invalid domain markers: {reason}"),
            Self::DomainMismatch {
                location,
                end,
                count,
            } => write!(
                f,
                "{location} domain ends at {end} but the mesh has {count} {location} elements"
            ),
            Self::DimensionTooLarge { name, value, max } => {
                write!(f, "{name} = {value} exceeds the maximum of {max}")
            }
            Self::DimensionTooSmall { name, value, min } => {
                write!(f, "{name} = {value} is below the minimum of {min}")
            }
        }
    }
}

impl std::error::Error for MeshError {}
