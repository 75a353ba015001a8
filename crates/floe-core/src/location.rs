//! Mesh-element locations and neighbor connectivities.

use std::fmt;

/// The kind of mesh element a value lives on.
///
/// Unstructured triangle meshes carry data on three element kinds:
/// vertices, cells (triangles), and edges. Every field is bound to
/// exactly one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Location {
    /// Mesh vertices (nodes).
    Vertex,
    /// Mesh cells (triangles).
    Cell,
    /// Mesh edges.
    Edge,
}

impl Location {
    /// All locations, in canonical order.
    pub const ALL: [Location; 3] = [Location::Vertex, Location::Cell, Location::Edge];

    /// Lowercase name, as used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Cell => "cell",
            Self::Edge => "edge",
        }
    }

    /// Position of this location in [`Location::ALL`].
    ///
    /// Used to index per-location arrays (element counts, domains).
    pub fn index(self) -> usize {
        match self {
            Self::Vertex => 0,
            Self::Cell => 1,
            Self::Edge => 2,
        }
    }

    /// The connectivity that iterates `self` and gathers over `source`
    /// neighbors.
    ///
    /// Reads like the arrow notation: `Location::Vertex.over(Location::Cell)`
    /// is the `Vertex > Cell` relation — for each vertex, its adjacent cells.
    pub const fn over(self, source: Location) -> Connectivity {
        Connectivity {
            target: self,
            source,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A neighbor relation between two element kinds.
///
/// `Connectivity { target, source }` maps each `target` element to its
/// adjacent `source` elements. A reduction over this relation iterates
/// target elements and aggregates values read at their source neighbors,
/// so the reduction's result is `target`-located and its body is
/// `source`-located.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connectivity {
    /// The element kind being iterated; the reduction result lives here.
    pub target: Location,
    /// The element kind of the gathered neighbors.
    pub source: Location,
}

impl Connectivity {
    /// Construct a connectivity from target and source locations.
    pub const fn new(target: Location, source: Location) -> Self {
        Self { target, source }
    }

    /// The opposite relation (`Cell > Vertex` becomes `Vertex > Cell`).
    pub const fn reversed(self) -> Self {
        Self {
            target: self.source,
            source: self.target,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {}", self.target, self.source)
    }
}
