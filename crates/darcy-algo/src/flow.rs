//! Volume-to-pressure-field pipelines.
//!
//! ```text
//! Volume ──► assemble_sparse ──► DarcySolver ──► CondensedIndex::expand ──► pressure
//! Volume ──► assemble_dense  ──► LinearSystemBackend ─────────────────────► pressure
//! ```
//!
//! Pressures come back in raw voxel order; solid voxels read `0.0`, which is
//! also what the identity rows of the dense system yield.

use darcy_core::solver::LinearSystemBackend;
use darcy_core::{DarcyResult, Shape, Volume};
use tracing::info;

use crate::assembly::{assemble_dense, assemble_sparse};
use crate::relaxation::{DarcySolution, DarcySolver, SolverConfig};

/// Pressure field of a volume with solver diagnostics.
#[derive(Debug, Clone)]
pub struct FlowField {
    pub shape: Shape,
    /// Pressure per voxel in raw order, solids at zero
    pub pressure: Vec<f32>,
    pub converged: bool,
    pub iterations: usize,
    /// Mean squared residual of the condensed solution
    pub error: f64,
}

/// Assemble the condensed system and relax it.
pub fn solve_volume(volume: &Volume, config: SolverConfig) -> DarcyResult<FlowField> {
    let system = assemble_sparse(volume)?;
    let DarcySolution {
        values,
        converged,
        iterations,
        error,
    } = DarcySolver::with_config(config).solve(&system.matrix, &system.rhs, None)?;
    let pressure = system.index.expand(&values, 0.0)?;
    info!(
        pores = system.size(),
        converged, iterations, error, "solved pressure field"
    );
    Ok(FlowField {
        shape: volume.shape(),
        pressure,
        converged,
        iterations,
        error,
    })
}

/// Solve the full dense system exactly with a direct backend.
pub fn solve_volume_dense(
    volume: &Volume,
    backend: &dyn LinearSystemBackend,
) -> DarcyResult<FlowField> {
    let system = assemble_dense(volume)?;
    let solution = backend.solve(&system.matrix, &system.rhs)?;
    let pressure: Vec<f32> = solution.iter().map(|&p| p as f32).collect();

    let mut sq = 0.0f64;
    for (row, coeffs) in system.matrix.iter().enumerate() {
        let ax: f64 = coeffs
            .iter()
            .zip(&solution)
            .map(|(&a, &x)| a as f64 * x)
            .sum();
        let r = ax - system.rhs[row] as f64;
        sq += r * r;
    }
    let error = sq / system.size() as f64;
    info!(voxels = system.size(), error, "solved dense system");

    Ok(FlowField {
        shape: volume.shape(),
        pressure,
        converged: true,
        iterations: 1,
        error,
    })
}
