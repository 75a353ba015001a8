//! Floe: stencil computations over unstructured meshes.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Floe sub-crates. For most users, adding `floe` as a single
//! dependency is sufficient.
//!
//! A stencil is a named, domain-scoped computation over fields bound to
//! mesh vertices, cells, or edges, optionally varying over a vertical
//! level axis. Neighbor data is aggregated with `sum_over` reductions
//! across mesh connectivities; the engine executes declarations with
//! either inlined or sequentially materialized reductions and verifies
//! the two agree.
//!
//! # Quick start
//!
//! ```rust
//! use floe::prelude::*;
//!
//! const THETA_V: FieldId = FieldId(0);
//! const TMP: FieldId = FieldId(1);
//!
//! // Gather a cell field onto vertices across the full domain.
//! let gather = StencilBuilder::new("gather_theta")
//!     .upward_across(
//!         Marker::LateralBoundary,
//!         Marker::End,
//!         vec![assign(
//!             TMP,
//!             sum_over(Location::Vertex.over(Location::Cell), field(THETA_V)),
//!         )],
//!     )
//!     .build();
//!
//! let config = ProgramConfig {
//!     mesh: Box::new(equilateral_mesh(8, 8).unwrap()),
//!     fields: vec![
//!         FieldDef::column("theta_v", Location::Cell),
//!         FieldDef::column("tmp", Location::Vertex),
//!     ],
//!     stencils: vec![gather],
//!     num_levels: 4,
//!     lowering: Lowering::Inlined,
//!     parallelism: Parallelism::Serial,
//! };
//!
//! let mut program = StencilProgram::new(config).unwrap();
//! program.field_mut(THETA_V).unwrap().fill(1.0);
//! let metrics = program.run().unwrap();
//! assert!(metrics.elements_processed > 0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `floe-core` | IDs, locations, connectivities, field definitions, access traits |
//! | [`mesh`] | `floe-mesh` | Mesh trait, CSR tables, horizontal domains, backends |
//! | [`stencil`] | `floe-stencil` | Expression DSL, builder, validation |
//! | [`engine`] | `floe-engine` | Program configuration, execution, verification, stats |
//! | [`stencils`] | `floe-stencils` | Reference stencils and field catalogs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`floe-core`).
///
/// Contains [`types::FieldDef`], [`types::Location`],
/// [`types::Connectivity`], and the field access traits.
pub use floe_core as types;

/// Mesh topology and horizontal domains (`floe-mesh`).
///
/// Provides the [`mesh::Mesh`] trait, the [`mesh::TriMesh`] backend,
/// [`mesh::equilateral_mesh`], and domain marker types.
pub use floe_mesh as mesh;

/// Stencil expression DSL and validation (`floe-stencil`).
///
/// Build declarations with [`stencil::StencilBuilder`] and the
/// [`stencil::field`]/[`stencil::sum_over`] constructors; check them
/// with [`stencil::validate`].
pub use floe_stencil as stencil;

/// Execution engine (`floe-engine`).
///
/// [`engine::StencilProgram`] validates, compiles, and runs stencils;
/// [`engine::verify`] checks lowering equivalence.
pub use floe_engine as engine;

/// Reference stencils (`floe-stencils`).
///
/// Includes [`stencils::staged_cell_gather`],
/// [`stencils::nested_vertex_gather`], and
/// [`stencils::edge_cell_vertex`] with their field catalogs.
pub use floe_stencils as stencils;

/// Common imports for typical Floe usage.
///
/// ```rust
/// use floe::prelude::*;
/// ```
///
/// Imports the most frequently used types: field definitions, locations,
/// mesh constructors, the stencil DSL, and the program types.
pub mod prelude {
    // Core types and traits
    pub use floe_core::{
        Connectivity, FieldDef, FieldId, FieldReader, FieldSet, FieldWriter, Location,
        VerticalExtent,
    };

    // Mesh
    pub use floe_mesh::{
        equilateral_mesh, DomainInterval, HorizontalDomain, Marker, Mesh, MeshError, TriMesh,
        TriMeshBuilder,
    };

    // Stencil DSL
    pub use floe_stencil::{
        assign, field, lit, sum_over, StencilBuilder, StencilDef, ValidationError,
        VerticalDirection,
    };

    // Engine
    pub use floe_engine::{
        verify, ConfigError, ExecError, ExecMetrics, Lowering, Parallelism, ProgramConfig,
        StencilProgram, DEFAULT_TOLERANCE,
    };
}
