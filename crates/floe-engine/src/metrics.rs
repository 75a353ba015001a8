//! Per-run performance metrics.
//!
//! [`ExecMetrics`] captures timing and workload data for a single
//! [`StencilProgram::run`](crate::StencilProgram::run), enabling
//! telemetry and the benchmark harness's timing statistics.

/// Timing and workload metrics collected during one program run.
///
/// All durations are in microseconds. The engine populates these after
/// each run; consumers (benchmark summaries, regression checks) read
/// them from the returned value.
#[derive(Clone, Debug, Default)]
pub struct ExecMetrics {
    /// Wall-clock time for the entire run, in microseconds.
    pub total_us: u64,
    /// Per-stencil execution times: `(name, microseconds)`.
    pub per_stencil: Vec<(String, u64)>,
    /// Number of element-level evaluations committed across all stencils.
    pub elements_processed: u64,
}
