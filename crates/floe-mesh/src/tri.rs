//! Explicit unstructured triangle mesh built from connectivity tables.

use crate::csr::CsrTable;
use crate::domain::HorizontalDomain;
use crate::error::MeshError;
use crate::mesh::Mesh;
use floe_core::{Connectivity, Location, MeshInstanceId};
use indexmap::IndexMap;

/// A general unstructured triangle mesh.
///
/// Holds per-location element counts, a registry of CSR neighbor tables
/// keyed by [`Connectivity`], and one [`HorizontalDomain`] per location.
/// Construction goes through [`TriMeshBuilder`], which validates every
/// table against the element counts.
///
/// # Examples
///
/// Two triangles sharing an edge:
///
/// ```
/// use floe_core::Location;
/// use floe_mesh::{Mesh, TriMeshBuilder};
///
/// let mesh = TriMeshBuilder::new()
///     .vertices(4)
///     .cells(2)
///     .connectivity(
///         Location::Cell.over(Location::Vertex),
///         vec![vec![0, 1, 2], vec![0, 2, 3]],
///     )
///     .build()
///     .unwrap();
/// assert_eq!(mesh.element_count(Location::Cell), 2);
/// let table = mesh.connectivity(Location::Cell.over(Location::Vertex)).unwrap();
/// assert_eq!(table.row(1), &[0, 2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct TriMesh {
    counts: [usize; 3],
    tables: IndexMap<Connectivity, CsrTable>,
    domains: [HorizontalDomain; 3],
    instance_id: MeshInstanceId,
}

impl TriMesh {
    /// Maximum element count per location: neighbor indices are `u32`.
    pub const MAX_ELEMENTS: usize = u32::MAX as usize;

    /// The relations this mesh carries, in registration order.
    pub fn connectivities(&self) -> impl Iterator<Item = Connectivity> + '_ {
        self.tables.keys().copied()
    }

    /// Replace one location's domain markers.
    ///
    /// Consumes the mesh and allocates a fresh instance ID: plans
    /// compiled against the old domains must not silently apply to the
    /// new ones.
    pub fn with_domain(
        mut self,
        location: Location,
        domain: HorizontalDomain,
    ) -> Result<Self, MeshError> {
        if domain.end() as usize != self.counts[location.index()] {
            return Err(MeshError::DomainMismatch {
                location,
                end: domain.end(),
                count: self.counts[location.index()],
            });
        }
        self.domains[location.index()] = domain;
        self.instance_id = MeshInstanceId::next();
        Ok(self)
    }
}

impl Mesh for TriMesh {
    fn element_count(&self, location: Location) -> usize {
        self.counts[location.index()]
    }

    fn connectivity(&self, conn: Connectivity) -> Option<&CsrTable> {
        self.tables.get(&conn)
    }

    fn domain(&self, location: Location) -> &HorizontalDomain {
        &self.domains[location.index()]
    }

    fn instance_id(&self) -> MeshInstanceId {
        self.instance_id
    }

    fn topology_eq(&self, other: &dyn Mesh) -> bool {
        match other.downcast_ref::<TriMesh>() {
            Some(o) => {
                self.counts == o.counts && self.domains == o.domains && self.tables == o.tables
            }
            None => false,
        }
    }
}

/// Builder for [`TriMesh`].
///
/// Element counts default to zero; domains default to
/// [`HorizontalDomain::full_range`] of the final count. Tables and
/// domains are validated in [`build`](TriMeshBuilder::build).
#[derive(Debug, Default)]
pub struct TriMeshBuilder {
    counts: [usize; 3],
    tables: IndexMap<Connectivity, Vec<Vec<u32>>>,
    domains: [Option<HorizontalDomain>; 3],
}

impl TriMeshBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertex count.
    pub fn vertices(mut self, n: usize) -> Self {
        self.counts[Location::Vertex.index()] = n;
        self
    }

    /// Set the cell count.
    pub fn cells(mut self, n: usize) -> Self {
        self.counts[Location::Cell.index()] = n;
        self
    }

    /// Set the edge count.
    pub fn edges(mut self, n: usize) -> Self {
        self.counts[Location::Edge.index()] = n;
        self
    }

    /// Register a neighbor table: `rows[i]` lists the source-element
    /// indices adjacent to target element `i`.
    ///
    /// Registering the same relation twice replaces the earlier table.
    pub fn connectivity(mut self, conn: Connectivity, rows: Vec<Vec<u32>>) -> Self {
        self.tables.insert(conn, rows);
        self
    }

    /// Set the horizontal domain of a location.
    pub fn domain(mut self, location: Location, domain: HorizontalDomain) -> Self {
        self.domains[location.index()] = Some(domain);
        self
    }

    /// Validate and build the mesh.
    pub fn build(self) -> Result<TriMesh, MeshError> {
        if self.counts.iter().all(|&c| c == 0) {
            return Err(MeshError::EmptyMesh);
        }
        for (name, &count) in ["vertices", "cells", "edges"].into_iter().zip(&self.counts) {
            if count > TriMesh::MAX_ELEMENTS {
                return Err(MeshError::DimensionTooLarge {
                    name,
                    value: count as u64,
                    max: TriMesh::MAX_ELEMENTS as u64,
                });
            }
        }

        let mut tables = IndexMap::with_capacity(self.tables.len());
        for (conn, rows) in self.tables {
            let target_count = self.counts[conn.target.index()];
            let source_count = self.counts[conn.source.index()];
            if rows.len() != target_count {
                return Err(MeshError::InvalidTable {
                    conn,
                    reason: format!(
                        "{} rows for {} {} elements",
                        rows.len(),
                        target_count,
                        conn.target
                    ),
                });
            }
            let table = CsrTable::from_rows(&rows);
            if let Some(max) = table.max_entry() {
                if max as usize >= source_count {
                    return Err(MeshError::InvalidTable {
                        conn,
                        reason: format!(
                            "entry {} out of bounds for {} {} elements",
                            max, source_count, conn.source
                        ),
                    });
                }
            }
            tables.insert(conn, table);
        }

        let mut domains = [
            HorizontalDomain::full_range(self.counts[0] as u32),
            HorizontalDomain::full_range(self.counts[1] as u32),
            HorizontalDomain::full_range(self.counts[2] as u32),
        ];
        for (i, location) in Location::ALL.iter().enumerate() {
            if let Some(d) = &self.domains[i] {
                if d.end() as usize != self.counts[i] {
                    return Err(MeshError::DomainMismatch {
                        location: *location,
                        end: d.end(),
                        count: self.counts[i],
                    });
                }
                domains[i] = d.clone();
            }
        }

        Ok(TriMesh {
            counts: self.counts,
            tables,
            domains,
            instance_id: MeshInstanceId::next(),
        })
    }
}
