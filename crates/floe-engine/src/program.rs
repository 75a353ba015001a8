//! The [`StencilProgram`]: validated, compiled, runnable.

use crate::config::{ConfigError, Lowering, Parallelism, ProgramConfig};
use crate::error::ExecError;
use crate::exec::execute_stencil;
use crate::metrics::ExecMetrics;
use crate::plan::{compile, CompiledStencil};
use crate::store::FieldStore;
use floe_core::{FieldDef, FieldId, FieldReader, FieldWriter};
use floe_mesh::Mesh;
use floe_stencil::StencilInfo;
use indexmap::IndexMap;
use std::time::Instant;

/// A set of stencils validated against a field catalog and compiled
/// against a mesh, together with the field storage they run over.
///
/// Construction performs every check up front; [`run`](Self::run) is
/// check-free except for internal consistency errors. Input fields are
/// loaded through [`field_mut`](Self::field_mut) before running, outputs
/// read back through [`field`](Self::field) after.
///
/// # Examples
///
/// ```
/// use floe_core::{FieldDef, FieldId, Location};
/// use floe_engine::{Lowering, Parallelism, ProgramConfig, StencilProgram};
/// use floe_mesh::{equilateral_mesh, Marker};
/// use floe_stencil::{assign, field, sum_over, StencilBuilder};
///
/// const THETA_V: FieldId = FieldId(0);
/// const TMP: FieldId = FieldId(1);
///
/// let stencil = StencilBuilder::new("gather_theta")
///     .upward_across(
///         Marker::LateralBoundary,
///         Marker::End,
///         vec![assign(
///             TMP,
///             sum_over(Location::Vertex.over(Location::Cell), field(THETA_V)),
///         )],
///     )
///     .build();
///
/// let config = ProgramConfig {
///     mesh: Box::new(equilateral_mesh(4, 4).unwrap()),
///     fields: vec![
///         FieldDef::column("theta_v", Location::Cell),
///         FieldDef::column("tmp", Location::Vertex),
///     ],
///     stencils: vec![stencil],
///     num_levels: 2,
///     lowering: Lowering::Inlined,
///     parallelism: Parallelism::Serial,
/// };
/// let mut program = StencilProgram::new(config).unwrap();
/// program.field_mut(THETA_V).unwrap().fill(1.0);
/// let metrics = program.run().unwrap();
/// assert!(metrics.elements_processed > 0);
/// // interior vertices of the lattice touch 6 cells
/// assert!(program.field(TMP).unwrap().contains(&6.0));
/// ```
pub struct StencilProgram {
    mesh: Box<dyn Mesh>,
    fields: Vec<FieldDef>,
    field_ids: IndexMap<String, FieldId>,
    compiled: Vec<CompiledStencil>,
    infos: Vec<StencilInfo>,
    store: FieldStore,
    lowering: Lowering,
    parallelism: Parallelism,
}

impl std::fmt::Debug for StencilProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StencilProgram")
            .field("fields", &self.fields.len())
            .field("compiled", &self.compiled.len())
            .field("infos", &self.infos.len())
            .finish_non_exhaustive()
    }
}

impl StencilProgram {
    /// Validate and compile a configuration into a runnable program.
    pub fn new(config: ProgramConfig) -> Result<Self, ConfigError> {
        let infos = config.validate()?;

        let ProgramConfig {
            mesh,
            fields,
            stencils,
            num_levels,
            lowering,
            parallelism,
        } = config;

        let compiled = stencils
            .iter()
            .map(|def| compile(def, &fields, mesh.as_ref()).map_err(ConfigError::Plan))
            .collect::<Result<Vec<_>, _>>()?;

        let field_ids = fields
            .iter()
            .enumerate()
            .map(|(i, def)| (def.name.clone(), FieldId(i as u32)))
            .collect();

        let store = FieldStore::new(&fields, mesh.as_ref(), num_levels);

        Ok(Self {
            mesh,
            fields,
            field_ids,
            compiled,
            infos,
            store,
            lowering,
            parallelism,
        })
    }

    /// Execute every stencil once, in declaration order.
    pub fn run(&mut self) -> Result<ExecMetrics, ExecError> {
        let run_start = Instant::now();
        let mut per_stencil = Vec::with_capacity(self.compiled.len());
        let mut elements_processed = 0u64;

        for cs in &self.compiled {
            let start = Instant::now();
            elements_processed += execute_stencil(
                cs,
                &mut self.store,
                self.mesh.as_ref(),
                self.lowering,
                self.parallelism,
            )?;
            per_stencil.push((cs.name.clone(), start.elapsed().as_micros() as u64));
        }

        Ok(ExecMetrics {
            total_us: run_start.elapsed().as_micros() as u64,
            per_stencil,
            elements_processed,
        })
    }

    /// Borrow a field buffer.
    pub fn field(&self, id: FieldId) -> Option<&[f64]> {
        self.store.read(id)
    }

    /// Borrow a field buffer mutably (to load inputs).
    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut [f64]> {
        self.store.write(id)
    }

    /// Look up a field by catalog name.
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.field_ids.get(name).copied()
    }

    /// The field catalog.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Derived read/write sets, one per stencil in declaration order.
    pub fn stencil_infos(&self) -> &[StencilInfo] {
        &self.infos
    }

    /// The mesh the program runs over.
    pub fn mesh(&self) -> &dyn Mesh {
        self.mesh.as_ref()
    }

    /// The underlying field store.
    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    /// Vertical level count.
    pub fn num_levels(&self) -> u32 {
        self.store.num_levels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::{verify, DEFAULT_TOLERANCE};
    use floe_core::Location;
    use floe_mesh::{equilateral_mesh, Marker};
    use floe_stencil::{assign, field, sum_over, StencilBuilder, StencilDef};
    use floe_test_utils::fill_random;

    const THETA: FieldId = FieldId(0);
    const OUT: FieldId = FieldId(1);

    fn catalog() -> Vec<FieldDef> {
        vec![
            FieldDef::column("theta_v", Location::Cell),
            FieldDef::column("out", Location::Cell),
        ]
    }

    fn nested() -> StencilDef {
        StencilBuilder::new("nested")
            .upward_across(
                Marker::LateralBoundary,
                Marker::End,
                vec![assign(
                    OUT,
                    sum_over(
                        Location::Cell.over(Location::Vertex),
                        sum_over(Location::Vertex.over(Location::Cell), field(THETA)),
                    ),
                )],
            )
            .build()
    }

    fn program(lowering: Lowering, parallelism: Parallelism) -> StencilProgram {
        let config = ProgramConfig {
            mesh: Box::new(equilateral_mesh(6, 6).unwrap()),
            fields: catalog(),
            stencils: vec![nested()],
            num_levels: 5,
            lowering,
            parallelism,
        };
        StencilProgram::new(config).unwrap()
    }

    #[test]
    fn run_reports_metrics() {
        let mut p = program(Lowering::Inlined, Parallelism::Serial);
        let cells = p.mesh().element_count(Location::Cell) as u64;
        let metrics = p.run().unwrap();
        assert_eq!(metrics.per_stencil.len(), 1);
        assert_eq!(metrics.per_stencil[0].0, "nested");
        assert_eq!(metrics.elements_processed, cells * 5);
    }

    #[test]
    fn lowering_strategies_agree_within_tolerance() {
        let mut inlined = program(Lowering::Inlined, Parallelism::Serial);
        let mut staged = program(Lowering::Sequential, Parallelism::Serial);

        let mut input = vec![0.0; inlined.field(THETA).unwrap().len()];
        fill_random(&mut input, 0x5eed);
        inlined.field_mut(THETA).unwrap().copy_from_slice(&input);
        staged.field_mut(THETA).unwrap().copy_from_slice(&input);

        inlined.run().unwrap();
        staged.run().unwrap();

        verify(
            inlined.field(OUT).unwrap(),
            staged.field(OUT).unwrap(),
            DEFAULT_TOLERANCE,
        )
        .unwrap();
    }

    #[test]
    fn parallel_run_matches_serial() {
        let mut serial = program(Lowering::Inlined, Parallelism::Serial);
        let mut parallel = program(
            Lowering::Inlined,
            Parallelism::Levels { threads: Some(4) },
        );

        let mut input = vec![0.0; serial.field(THETA).unwrap().len()];
        fill_random(&mut input, 7);
        serial.field_mut(THETA).unwrap().copy_from_slice(&input);
        parallel.field_mut(THETA).unwrap().copy_from_slice(&input);

        serial.run().unwrap();
        parallel.run().unwrap();
        assert_eq!(serial.field(OUT).unwrap(), parallel.field(OUT).unwrap());
    }

    #[test]
    fn field_lookup_by_name() {
        let p = program(Lowering::Inlined, Parallelism::Serial);
        assert_eq!(p.field_id("theta_v"), Some(THETA));
        assert_eq!(p.field_id("out"), Some(OUT));
        assert_eq!(p.field_id("missing"), None);
    }

    #[test]
    fn construction_rejects_missing_connectivity() {
        let mesh = floe_mesh::TriMeshBuilder::new()
            .vertices(4)
            .cells(2)
            .build()
            .unwrap();
        let config = ProgramConfig {
            mesh: Box::new(mesh),
            fields: catalog(),
            stencils: vec![nested()],
            num_levels: 2,
            lowering: Lowering::Inlined,
            parallelism: Parallelism::Serial,
        };
        assert!(matches!(
            StencilProgram::new(config).unwrap_err(),
            ConfigError::Plan(_)
        ));
    }
}
