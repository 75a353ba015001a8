//! Fixture meshes with hand-checkable connectivity.

use floe_core::Location;
use floe_mesh::{equilateral_mesh, TriMesh, TriMeshBuilder};

/// Two triangles sharing the diagonal edge `(0, 2)`:
///
/// ```text
///   1 --- 2
///   | c0 /|
///   |  / c1
///   | /   |
///   0 --- 3
/// ```
///
/// - cells: `c0 = (0, 1, 2)`, `c1 = (0, 2, 3)`
/// - edges: `e0 = (0,1)`, `e1 = (1,2)`, `e2 = (0,2)`, `e3 = (2,3)`,
///   `e4 = (0,3)`
///
/// All six mixed connectivities are registered, so every reduction chain
/// can be hand-computed: e.g. gathering a cell field to vertices gives
/// `v0 = c0+c1`, `v1 = c0`, `v2 = c0+c1`, `v3 = c1`.
///
/// # Panics
///
/// Panics if the fixture tables fail validation, which would be a bug in
/// the fixture itself.
pub fn twin_triangle_mesh() -> TriMesh {
    TriMeshBuilder::new()
        .vertices(4)
        .cells(2)
        .edges(5)
        .connectivity(
            Location::Cell.over(Location::Vertex),
            vec![vec![0, 1, 2], vec![0, 2, 3]],
        )
        .connectivity(
            Location::Vertex.over(Location::Cell),
            vec![vec![0, 1], vec![0], vec![0, 1], vec![1]],
        )
        .connectivity(
            Location::Edge.over(Location::Vertex),
            vec![vec![0, 1], vec![1, 2], vec![0, 2], vec![2, 3], vec![0, 3]],
        )
        .connectivity(
            Location::Edge.over(Location::Cell),
            vec![vec![0], vec![0], vec![0, 1], vec![1], vec![1]],
        )
        .connectivity(
            Location::Cell.over(Location::Edge),
            vec![vec![0, 1, 2], vec![2, 3, 4]],
        )
        .connectivity(
            Location::Vertex.over(Location::Edge),
            vec![vec![0, 2, 4], vec![0, 1], vec![1, 2, 3], vec![3, 4]],
        )
        .build()
        .expect("twin triangle fixture must validate")
}

/// A 4×4 equilateral lattice (16 vertices, 18 cells, 33 edges): big
/// enough to have interior elements, small enough to print.
///
/// # Panics
///
/// Panics if generation fails, which would be a bug in the generator.
pub fn small_equilateral() -> TriMesh {
    equilateral_mesh(4, 4).expect("4x4 lattice must generate")
}
