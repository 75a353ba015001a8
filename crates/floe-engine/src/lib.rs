//! Execution engine for Floe stencil programs.
//!
//! A [`StencilProgram`] owns a mesh, a field store, and a set of
//! validated, compiled stencils. [`StencilProgram::run`] executes the
//! stencils in order and reports [`ExecMetrics`].
//!
//! # Lowering
//!
//! Nested neighbor reductions execute under one of two strategies
//! ([`Lowering`]):
//!
//! - **Inlined**: each assignment is a single pass; nested reductions are
//!   evaluated recursively at every element.
//! - **Sequential**: every reduction is materialized into a scratch
//!   buffer in its own pass, innermost first, and the final assignment
//!   reads the staged results. Scratch passes cover the full element
//!   range of their location, so staged values exist for every neighbor
//!   the final pass touches.
//!
//! Both strategies produce results equal within 1e-12
//! ([`verify::DEFAULT_TOLERANCE`]); [`verify::verify`] checks that.
//!
//! # Parallelism
//!
//! Stencil expressions have no vertical coupling, so levels are
//! independent. [`Parallelism::Levels`] splits the level axis into
//! contiguous bands executed by scoped worker threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
mod exec;
pub mod metrics;
pub mod plan;
pub mod program;
pub mod stats;
pub mod store;
pub mod verify;

pub use config::{ConfigError, Lowering, Parallelism, ProgramConfig};
pub use error::{ExecError, PlanError};
pub use metrics::ExecMetrics;
pub use plan::{compile, CompiledBlock, CompiledStencil, CompiledStmt};
pub use program::StencilProgram;
pub use store::FieldStore;
pub use verify::{verify, Divergence, VerifyError, DEFAULT_TOLERANCE};
