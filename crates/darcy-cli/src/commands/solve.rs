use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use darcy_algo::{solve_volume, solve_volume_dense, FlowField};
use darcy_cli::{DarcyConfig, SolveBackend, SolverOverrides};
use darcy_core::solver::BackendKind;
use darcy_core::Shape;
use serde::Serialize;
use tracing::{info, warn};

use super::util::{configure_threads, emit, load_volume};

#[derive(Serialize)]
struct SolveReport<'a> {
    shape: Shape,
    pressure: &'a [f32],
    converged: bool,
    iterations: usize,
    error: f64,
    backend: &'a str,
}

pub fn handle(
    config: &DarcyConfig,
    volume: &Path,
    out: Option<&Path>,
    backend: SolveBackend,
    overrides: &SolverOverrides,
    threads: &str,
) -> Result<()> {
    let start = Instant::now();
    configure_threads(threads);
    let volume = load_volume(volume)?;

    let field: FlowField = match backend {
        SolveBackend::Relaxation => {
            let solver_config = config.solver_with(overrides);
            solver_config.validate()?;
            solve_volume(&volume, solver_config)?
        }
        SolveBackend::Gauss | SolveBackend::Faer => {
            let kind: BackendKind = backend.as_str().parse()?;
            solve_volume_dense(&volume, kind.build_solver().as_ref())?
        }
    };

    if !field.converged {
        warn!(
            iterations = field.iterations,
            error = field.error,
            "solution did not reach the target error"
        );
    }
    info!(
        backend = backend.as_str(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "solve finished"
    );

    let report = SolveReport {
        shape: field.shape,
        pressure: &field.pressure,
        converged: field.converged,
        iterations: field.iterations,
        error: field.error,
        backend: backend.as_str(),
    };
    emit(&report, out)
}
