//! Program configuration and validation.
//!
//! [`ProgramConfig`] is the builder-input for constructing a
//! [`StencilProgram`](crate::StencilProgram). [`validate()`](ProgramConfig::validate)
//! checks structural invariants and runs stencil validation; the program
//! constructor then compiles each stencil against the mesh.

use crate::error::PlanError;
use std::fmt;

use floe_core::FieldDef;
use floe_mesh::Mesh;
use floe_stencil::{validate, StencilDef, StencilInfo, ValidationError};

// ── Execution strategy ─────────────────────────────────────────────

/// How nested neighbor reductions are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lowering {
    /// One pass per assignment; nested reductions evaluated recursively
    /// in place.
    #[default]
    Inlined,
    /// Every reduction materialized into a scratch buffer in its own
    /// pass, innermost first.
    Sequential,
}

/// How the level axis is distributed over threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Parallelism {
    /// Single-threaded execution, levels in block traversal order.
    #[default]
    Serial,
    /// Contiguous level bands executed by scoped worker threads.
    ///
    /// Valid because stencil expressions carry no vertical coupling;
    /// levels are independent.
    Levels {
        /// Worker count. `None` = auto-detect
        /// (`available_parallelism / 2`, clamped to `[2, 16]`).
        threads: Option<usize>,
    },
}

impl Parallelism {
    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`.
    pub fn resolved_threads(&self) -> usize {
        match self {
            Self::Serial => 1,
            Self::Levels { threads: Some(n) } => (*n).clamp(1, 64),
            Self::Levels { threads: None } => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4);
                (cpus / 2).clamp(2, 16)
            }
        }
    }
}

// ── ProgramConfig ──────────────────────────────────────────────────

/// Configuration for a [`StencilProgram`](crate::StencilProgram).
pub struct ProgramConfig {
    /// Mesh topology the program executes over.
    pub mesh: Box<dyn Mesh>,
    /// Field catalog; [`FieldId`](floe_core::FieldId) indexes it.
    pub fields: Vec<FieldDef>,
    /// Stencils, executed in order on every run.
    pub stencils: Vec<StencilDef>,
    /// Vertical level count for column fields.
    pub num_levels: u32,
    /// Reduction execution strategy.
    pub lowering: Lowering,
    /// Thread distribution over the level axis.
    pub parallelism: Parallelism,
}

impl ProgramConfig {
    /// Check structural invariants and validate every stencil.
    ///
    /// Returns the per-stencil [`StencilInfo`]s in declaration order.
    pub fn validate(&self) -> Result<Vec<StencilInfo>, ConfigError> {
        if self.fields.is_empty() {
            return Err(ConfigError::NoFields);
        }
        if self.stencils.is_empty() {
            return Err(ConfigError::NoStencils);
        }
        if self.num_levels == 0 {
            return Err(ConfigError::ZeroLevels);
        }
        self.stencils
            .iter()
            .map(|def| validate(def, &self.fields).map_err(ConfigError::Validation))
            .collect()
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while constructing a program.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// No fields registered.
    NoFields,
    /// No stencils registered.
    NoStencils,
    /// The vertical level count is zero.
    ZeroLevels,
    /// A stencil failed validation against the catalog.
    Validation(ValidationError),
    /// A stencil failed compilation against the mesh.
    Plan(PlanError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFields => write!(f, "no fields registered"),
            Self::NoStencils => write!(f, "no stencils registered"),
            Self::ZeroLevels => write!(f, "num_levels must be at least 1"),
            Self::Validation(e) => write!(f, "stencil validation failed: {e}"),
            Self::Plan(e) => write!(f, "stencil compilation failed: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Plan(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_core::{FieldId, Location};
    use floe_mesh::{equilateral_mesh, Marker};
    use floe_stencil::{assign, lit, StencilBuilder};

    fn config_with(stencils: Vec<StencilDef>, fields: Vec<FieldDef>) -> ProgramConfig {
        ProgramConfig {
            mesh: Box::new(equilateral_mesh(3, 3).unwrap()),
            fields,
            stencils,
            num_levels: 4,
            lowering: Lowering::default(),
            parallelism: Parallelism::default(),
        }
    }

    fn fill_stencil() -> StencilDef {
        StencilBuilder::new("fill")
            .upward_across(
                Marker::LateralBoundary,
                Marker::End,
                vec![assign(FieldId(0), lit(1.0))],
            )
            .build()
    }

    #[test]
    fn valid_config_passes() {
        let cfg = config_with(
            vec![fill_stencil()],
            vec![FieldDef::column("out", Location::Cell)],
        );
        let infos = cfg.validate().unwrap();
        assert_eq!(infos.len(), 1);
        assert!(infos[0].writes.contains(FieldId(0)));
    }

    #[test]
    fn structural_errors() {
        let cfg = config_with(vec![fill_stencil()], vec![]);
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::NoFields);

        let cfg = config_with(vec![], vec![FieldDef::column("out", Location::Cell)]);
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::NoStencils);

        let mut cfg = config_with(
            vec![fill_stencil()],
            vec![FieldDef::column("out", Location::Cell)],
        );
        cfg.num_levels = 0;
        assert_eq!(cfg.validate().unwrap_err(), ConfigError::ZeroLevels);
    }

    #[test]
    fn validation_errors_are_wrapped() {
        let cfg = config_with(
            vec![StencilBuilder::new("empty").build()],
            vec![FieldDef::column("out", Location::Cell)],
        );
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::Validation(_)
        ));
    }

    #[test]
    fn resolved_threads_clamps() {
        assert_eq!(Parallelism::Serial.resolved_threads(), 1);
        assert_eq!(
            Parallelism::Levels { threads: Some(0) }.resolved_threads(),
            1
        );
        assert_eq!(
            Parallelism::Levels {
                threads: Some(1000)
            }
            .resolved_threads(),
            64
        );
        let auto = Parallelism::Levels { threads: None }.resolved_threads();
        assert!((2..=16).contains(&auto));
    }
}
