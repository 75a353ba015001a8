//! Error types for plan compilation and execution.

use floe_core::{Connectivity, FieldId};
use std::fmt;

/// Errors from compiling a validated stencil against a mesh.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanError {
    /// The stencil reduces over a relation the mesh does not carry.
    MissingConnectivity {
        /// Offending stencil.
        stencil: String,
        /// The absent relation.
        conn: Connectivity,
    },
    /// A referenced field is not in the catalog.
    ///
    /// Validation catches this first; compilation re-checks because it
    /// resolves iteration ranges through field locations.
    UnknownField {
        /// Offending stencil.
        stencil: String,
        /// The missing ID.
        field: FieldId,
    },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConnectivity { stencil, conn } => {
                write!(f, "stencil '{stencil}': mesh has no {conn} table")
            }
            Self::UnknownField { stencil, field } => {
                write!(f, "stencil '{stencil}': field {field} is not in the catalog")
            }
        }
    }
}

impl std::error::Error for PlanError {}

/// Errors raised while executing a compiled program.
///
/// Construction validates stencils and plans against the owned mesh and
/// store, so these surface only when the engine's own state is
/// inconsistent or a caller drives compiled pieces directly with
/// mismatched inputs.
#[derive(Clone, Debug, PartialEq)]
pub enum ExecError {
    /// A reduction's relation disappeared between planning and execution.
    MissingConnectivity {
        /// Offending stencil.
        stencil: String,
        /// The absent relation.
        conn: Connectivity,
    },
    /// A field buffer is absent from the store.
    MissingField {
        /// Offending stencil.
        stencil: String,
        /// The absent field.
        field: FieldId,
    },
}

impl fmt::Display for ExecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConnectivity { stencil, conn } => {
                write!(f, "stencil '{stencil}': mesh has no {conn} table")
            }
            Self::MissingField { stencil, field } => {
                write!(f, "stencil '{stencil}': field {field} has no buffer")
            }
        }
    }
}

impl std::error::Error for ExecError {}
