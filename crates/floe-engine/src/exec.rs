//! Stencil execution: inlined and sequential lowering, serial and
//! level-parallel driving.
//!
//! Each statement is computed into a staging copy of its target buffer
//! and committed afterwards, so a statement reading its own target sees
//! the pre-statement state while later statements see committed results.
//! Under [`Parallelism::Levels`] the staging copy is split into
//! contiguous per-level slices handed to scoped worker threads; band
//! results are drained over a channel.

use crate::config::{Lowering, Parallelism};
use crate::error::ExecError;
use crate::plan::{CompiledStencil, CompiledStmt};
use crate::store::FieldStore;
use floe_core::{Connectivity, FieldId, FieldReader, FieldWriter};
use floe_mesh::{CsrTable, Mesh};
use floe_stencil::{BinOp, Expr, VerticalDirection};

/// Execute one compiled stencil. Returns the number of element-level
/// evaluations committed.
pub(crate) fn execute_stencil(
    cs: &CompiledStencil,
    store: &mut FieldStore,
    mesh: &dyn Mesh,
    lowering: Lowering,
    parallelism: Parallelism,
) -> Result<u64, ExecError> {
    let mut processed = 0u64;
    for block in &cs.blocks {
        for stmt in &block.stmts {
            processed += execute_stmt(cs, stmt, block.direction, store, mesh, lowering, parallelism)?;
        }
    }
    Ok(processed)
}

fn execute_stmt(
    cs: &CompiledStencil,
    stmt: &CompiledStmt,
    direction: VerticalDirection,
    store: &mut FieldStore,
    mesh: &dyn Mesh,
    lowering: Lowering,
    parallelism: Parallelism,
) -> Result<u64, ExecError> {
    let missing = || ExecError::MissingField {
        stencil: cs.name.clone(),
        field: stmt.target,
    };
    let element_count = store.element_count(stmt.target).ok_or_else(missing)?;
    let num_levels = store.num_levels();
    if element_count == 0 || stmt.range.is_empty() {
        return Ok(0);
    }

    // Pre-lower once per statement; shared read-only by every band.
    let prepared = match lowering {
        Lowering::Inlined => Prepared::Inlined(&stmt.value),
        Lowering::Sequential => Prepared::Staged(StagedStmt::lower(&stmt.value)),
    };

    // Stage into a copy so reads of the target see pre-statement state
    // and elements outside the range keep their values.
    let mut staging = store.read(stmt.target).ok_or_else(missing)?.to_vec();

    let processed = if stmt.surface_target {
        // Level-independent: one pass regardless of direction or threads.
        run_level(cs, stmt, &prepared, 0, &mut staging, store, mesh)?
    } else {
        match parallelism {
            Parallelism::Serial => {
                let mut total = 0u64;
                let levels: Vec<u32> = match direction {
                    VerticalDirection::Upward => (0..num_levels).collect(),
                    VerticalDirection::Downward => (0..num_levels).rev().collect(),
                };
                for k in levels {
                    let lo = k as usize * element_count;
                    let out = &mut staging[lo..lo + element_count];
                    total += run_level(cs, stmt, &prepared, k, out, store, mesh)?;
                }
                total
            }
            Parallelism::Levels { .. } => {
                let bands = parallelism.resolved_threads().min(num_levels as usize);
                run_level_bands(cs, stmt, &prepared, &mut staging, element_count, bands, store, mesh)?
            }
        }
    };

    store
        .write(stmt.target)
        .ok_or_else(missing)?
        .copy_from_slice(&staging);
    Ok(processed)
}

/// Distribute the level slices of `staging` over `bands` scoped workers.
#[allow(clippy::too_many_arguments)]
fn run_level_bands(
    cs: &CompiledStencil,
    stmt: &CompiledStmt,
    prepared: &Prepared<'_>,
    staging: &mut [f64],
    element_count: usize,
    bands: usize,
    store: &FieldStore,
    mesh: &dyn Mesh,
) -> Result<u64, ExecError> {
    let mut level_slices: Vec<(u32, &mut [f64])> = staging
        .chunks_mut(element_count)
        .enumerate()
        .map(|(k, slice)| (k as u32, slice))
        .collect();
    let per_band = level_slices.len().div_ceil(bands);

    let (tx, rx) = crossbeam_channel::bounded::<Result<u64, ExecError>>(bands);
    std::thread::scope(|scope| {
        while !level_slices.is_empty() {
            let take = per_band.min(level_slices.len());
            let band: Vec<(u32, &mut [f64])> = level_slices.drain(..take).collect();
            let tx = tx.clone();
            scope.spawn(move || {
                let mut total = 0u64;
                let mut result = Ok(0u64);
                for (k, out) in band {
                    match run_level(cs, stmt, prepared, k, out, store, mesh) {
                        Ok(n) => total += n,
                        Err(e) => {
                            result = Err(e);
                            break;
                        }
                    }
                }
                let _ = tx.send(result.map(|_| total));
            });
        }
        drop(tx);

        let mut processed = 0u64;
        for band_result in rx.iter() {
            processed += band_result?;
        }
        Ok(processed)
    })
}

/// Evaluate one statement for one level into `out` (a full level slice
/// indexed by element).
fn run_level(
    cs: &CompiledStencil,
    stmt: &CompiledStmt,
    prepared: &Prepared<'_>,
    level: u32,
    out: &mut [f64],
    store: &FieldStore,
    mesh: &dyn Mesh,
) -> Result<u64, ExecError> {
    let ctx = EvalCtx {
        stencil: &cs.name,
        store,
        mesh,
        level,
    };
    match prepared {
        Prepared::Inlined(expr) => {
            for i in stmt.range.clone() {
                out[i as usize] = ctx.eval(expr, i)?;
            }
        }
        Prepared::Staged(staged) => {
            let mut scratch: Vec<Vec<f64>> = Vec::with_capacity(staged.passes.len());
            for pass in &staged.passes {
                let table = ctx.table(pass.conn)?;
                let n = ctx.mesh.element_count(pass.conn.target);
                let mut buf = vec![0.0; n];
                for (e, slot) in buf.iter_mut().enumerate() {
                    let mut sum = 0.0;
                    for &nb in table.row(e as u32) {
                        sum += ctx.eval_lowered(&pass.body, nb, &scratch)?;
                    }
                    *slot = sum;
                }
                scratch.push(buf);
            }
            for i in stmt.range.clone() {
                out[i as usize] = ctx.eval_lowered(&staged.value, i, &scratch)?;
            }
        }
    }
    Ok(stmt.range.len() as u64)
}

/// A statement prepared for execution under one lowering strategy.
enum Prepared<'a> {
    Inlined(&'a Expr),
    Staged(StagedStmt),
}

/// A reduction pass materializing one `sum_over` into a scratch buffer.
struct ScratchPass {
    conn: Connectivity,
    body: LoweredExpr,
}

/// Sequential form of a statement: reduction passes (innermost first)
/// plus a reduction-free final expression over their results.
struct StagedStmt {
    passes: Vec<ScratchPass>,
    value: LoweredExpr,
}

impl StagedStmt {
    fn lower(expr: &Expr) -> Self {
        let mut passes = Vec::new();
        let value = lower_expr(expr, &mut passes);
        Self { passes, value }
    }
}

/// Expression form after sequential lowering: reductions are replaced by
/// references to the scratch buffer of their pass.
enum LoweredExpr {
    Lit(f64),
    Field(FieldId),
    Scratch(usize),
    Neg(Box<LoweredExpr>),
    Bin {
        op: BinOp,
        lhs: Box<LoweredExpr>,
        rhs: Box<LoweredExpr>,
    },
}

fn lower_expr(expr: &Expr, passes: &mut Vec<ScratchPass>) -> LoweredExpr {
    match expr {
        Expr::Lit(v) => LoweredExpr::Lit(*v),
        Expr::Field(id) => LoweredExpr::Field(*id),
        Expr::Neg(inner) => LoweredExpr::Neg(Box::new(lower_expr(inner, passes))),
        Expr::Bin { op, lhs, rhs } => LoweredExpr::Bin {
            op: *op,
            lhs: Box::new(lower_expr(lhs, passes)),
            rhs: Box::new(lower_expr(rhs, passes)),
        },
        Expr::SumOver { conn, body } => {
            let body = lower_expr(body, passes);
            passes.push(ScratchPass { conn: *conn, body });
            LoweredExpr::Scratch(passes.len() - 1)
        }
    }
}

/// Shared read state for evaluating one level.
struct EvalCtx<'a> {
    stencil: &'a str,
    store: &'a FieldStore,
    mesh: &'a dyn Mesh,
    level: u32,
}

impl EvalCtx<'_> {
    fn sample(&self, field: FieldId, element: u32) -> Result<f64, ExecError> {
        self.store
            .sample(field, element, self.level)
            .ok_or_else(|| ExecError::MissingField {
                stencil: self.stencil.to_string(),
                field,
            })
    }

    fn table(&self, conn: Connectivity) -> Result<&CsrTable, ExecError> {
        self.mesh
            .connectivity(conn)
            .ok_or_else(|| ExecError::MissingConnectivity {
                stencil: self.stencil.to_string(),
                conn,
            })
    }

    /// Recursive inlined evaluation at one element.
    fn eval(&self, expr: &Expr, element: u32) -> Result<f64, ExecError> {
        match expr {
            Expr::Lit(v) => Ok(*v),
            Expr::Field(id) => self.sample(*id, element),
            Expr::Neg(inner) => Ok(-self.eval(inner, element)?),
            Expr::Bin { op, lhs, rhs } => {
                Ok(op.apply(self.eval(lhs, element)?, self.eval(rhs, element)?))
            }
            Expr::SumOver { conn, body } => {
                let table = self.table(*conn)?;
                let mut sum = 0.0;
                for &nb in table.row(element) {
                    sum += self.eval(body, nb)?;
                }
                Ok(sum)
            }
        }
    }

    /// Evaluation of a sequentially lowered expression; completed passes
    /// are read from `scratch`.
    fn eval_lowered(
        &self,
        expr: &LoweredExpr,
        element: u32,
        scratch: &[Vec<f64>],
    ) -> Result<f64, ExecError> {
        match expr {
            LoweredExpr::Lit(v) => Ok(*v),
            LoweredExpr::Field(id) => self.sample(*id, element),
            LoweredExpr::Scratch(pass) => Ok(scratch[*pass][element as usize]),
            LoweredExpr::Neg(inner) => Ok(-self.eval_lowered(inner, element, scratch)?),
            LoweredExpr::Bin { op, lhs, rhs } => Ok(op.apply(
                self.eval_lowered(lhs, element, scratch)?,
                self.eval_lowered(rhs, element, scratch)?,
            )),
        }
    }
}
