//! Structured triangle-grid generator.
//!
//! Builds a rows×cols vertex lattice triangulated two cells per quad,
//! with the six canonical connectivity tables. The synthetic stand-in
//! for externally loaded production grids: topologically a regular
//! triangulation where every interior vertex touches 6 cells, every
//! cell has 3 vertices and 3 edges, and every interior edge 2 cells.

use crate::error::MeshError;
use crate::tri::{TriMesh, TriMeshBuilder};
use floe_core::Location;
use smallvec::SmallVec;

type Row = SmallVec<[u32; 6]>;

/// Generate a structured triangle mesh over a `rows` × `cols` vertex
/// lattice.
///
/// Each lattice quad `(r, c)` is split along its falling diagonal into a
/// lower triangle `(v(r,c), v(r+1,c), v(r+1,c+1))` and an upper triangle
/// `(v(r,c), v(r+1,c+1), v(r,c+1))`. Edges come in three families —
/// horizontal, vertical, diagonal — numbered family by family.
///
/// All six mixed connectivities are registered. Domains default to the
/// full range per location; callers with measured splitter indices
/// rebuild through [`TriMeshBuilder`] or adjust fixtures downstream.
///
/// Requires `rows >= 2` and `cols >= 2`.
pub fn equilateral_mesh(rows: u32, cols: u32) -> Result<TriMesh, MeshError> {
    for (name, value) in [("rows", rows), ("cols", cols)] {
        if value < 2 {
            return Err(MeshError::DimensionTooSmall {
                name,
                value: value as u64,
                min: 2,
            });
        }
    }
    if rows as u64 * cols as u64 > TriMesh::MAX_ELEMENTS as u64 {
        return Err(MeshError::DimensionTooLarge {
            name: "vertices",
            value: rows as u64 * cols as u64,
            max: TriMesh::MAX_ELEMENTS as u64,
        });
    }

    let (rows, cols) = (rows as usize, cols as usize);
    let (qrows, qcols) = (rows - 1, cols - 1);

    let n_vertices = rows * cols;
    let n_cells = 2 * qrows * qcols;
    let h_count = rows * qcols;
    let v_count = qrows * cols;
    let n_edges = h_count + v_count + qrows * qcols;

    let v = |r: usize, c: usize| (r * cols + c) as u32;
    let h_edge = |r: usize, c: usize| (r * qcols + c) as u32;
    let v_edge = |r: usize, c: usize| (h_count + r * cols + c) as u32;
    let d_edge = |r: usize, c: usize| (h_count + v_count + r * qcols + c) as u32;

    let mut cell_vertices: Vec<Row> = Vec::with_capacity(n_cells);
    let mut cell_edges: Vec<Row> = Vec::with_capacity(n_cells);
    for r in 0..qrows {
        for c in 0..qcols {
            let (v00, v01) = (v(r, c), v(r, c + 1));
            let (v10, v11) = (v(r + 1, c), v(r + 1, c + 1));
            // lower triangle
            cell_vertices.push(Row::from_slice(&[v00, v10, v11]));
            cell_edges.push(Row::from_slice(&[v_edge(r, c), h_edge(r + 1, c), d_edge(r, c)]));
            // upper triangle
            cell_vertices.push(Row::from_slice(&[v00, v11, v01]));
            cell_edges.push(Row::from_slice(&[h_edge(r, c), v_edge(r, c + 1), d_edge(r, c)]));
        }
    }

    let mut edge_vertices: Vec<Row> = Vec::with_capacity(n_edges);
    for r in 0..rows {
        for c in 0..qcols {
            edge_vertices.push(Row::from_slice(&[v(r, c), v(r, c + 1)]));
        }
    }
    for r in 0..qrows {
        for c in 0..cols {
            edge_vertices.push(Row::from_slice(&[v(r, c), v(r + 1, c)]));
        }
    }
    for r in 0..qrows {
        for c in 0..qcols {
            edge_vertices.push(Row::from_slice(&[v(r, c), v(r + 1, c + 1)]));
        }
    }

    let vertex_cells = invert(&cell_vertices, n_vertices);
    let vertex_edges = invert(&edge_vertices, n_vertices);
    let edge_cells = invert(&cell_edges, n_edges);

    TriMeshBuilder::new()
        .vertices(n_vertices)
        .cells(n_cells)
        .edges(n_edges)
        .connectivity(Location::Cell.over(Location::Vertex), to_vecs(cell_vertices))
        .connectivity(Location::Cell.over(Location::Edge), to_vecs(cell_edges))
        .connectivity(Location::Edge.over(Location::Vertex), to_vecs(edge_vertices))
        .connectivity(Location::Edge.over(Location::Cell), to_vecs(edge_cells))
        .connectivity(Location::Vertex.over(Location::Cell), to_vecs(vertex_cells))
        .connectivity(Location::Vertex.over(Location::Edge), to_vecs(vertex_edges))
        .build()
}

/// Transpose a neighbor table: `out[t]` lists every row of `rows` that
/// contains `t`, in row order.
fn invert(rows: &[Row], target_count: usize) -> Vec<Row> {
    let mut out = vec![Row::new(); target_count];
    for (i, row) in rows.iter().enumerate() {
        for &t in row {
            out[t as usize].push(i as u32);
        }
    }
    out
}

fn to_vecs(rows: Vec<Row>) -> Vec<Vec<u32>> {
    rows.into_iter().map(|r| r.to_vec()).collect()
}
