//! Adaptive-step fixed-point relaxation for condensed Darcy systems.
//!
//! ## Algorithm
//!
//! Starting from `x₀` (by default a linear ramp from 1 down to 0) each
//! iteration proposes a damped Jacobi update
//!
//! ```text
//! x' = x − step · r / diag(A),     r = A·x − b
//! ```
//!
//! and scores it by the mean squared residual `e' = mean((A·x' − b)²)`:
//!
//! - `e' ≤ target_error`: converged, return `x'`
//! - `e' < e`: accept `x'` and relax the step toward `max_step`
//! - otherwise: reject `x'` and back the step off (see [`step`])
//!
//! Exhausting `max_iterations` is not an error; the best accepted iterate is
//! returned with `converged = false`.

pub mod config;
pub mod residual;
pub mod step;

use darcy_core::{DarcyError, DarcyResult, SparseMatrix};
use tracing::{debug, trace, warn};

pub use config::SolverConfig;
pub use residual::{mean_squared, residuals, residuals_into};
pub use step::StepController;

/// Result of a relaxation solve.
#[derive(Debug, Clone, PartialEq)]
pub struct DarcySolution {
    /// Solution in condensed index space
    pub values: Vec<f32>,
    /// Whether `target_error` was reached
    pub converged: bool,
    /// Proposals evaluated
    pub iterations: usize,
    /// Mean squared residual of `values`
    pub error: f64,
}

/// Adaptive-step relaxation solver.
#[derive(Debug, Clone, Default)]
pub struct DarcySolver {
    config: SolverConfig,
}

impl DarcySolver {
    /// Create a solver with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve `A·x = b` for a condensed system.
    ///
    /// `initial_guess` defaults to [`linear_ramp`]. Fails only on malformed
    /// input: mismatched lengths, an empty system, an invalid configuration
    /// or a row whose diagonal is missing or zero.
    pub fn solve(
        &self,
        matrix: &SparseMatrix,
        rhs: &[f32],
        initial_guess: Option<&[f32]>,
    ) -> DarcyResult<DarcySolution> {
        self.config.validate()?;
        let n = rhs.len();
        if n == 0 {
            return Err(DarcyError::Solver("empty system".to_string()));
        }
        if matrix.n_rows() != n {
            return Err(DarcyError::DimensionMismatch {
                expected: n,
                actual: matrix.n_rows(),
            });
        }
        if matrix.n_cols() > n {
            return Err(DarcyError::DimensionMismatch {
                expected: n,
                actual: matrix.n_cols(),
            });
        }
        let diag = diagonal(matrix)?;

        let mut x = match initial_guess {
            Some(guess) if guess.len() != n => {
                return Err(DarcyError::DimensionMismatch {
                    expected: n,
                    actual: guess.len(),
                })
            }
            Some(guess) => guess.to_vec(),
            None => linear_ramp(n),
        };

        let mut residuals = residual::residuals(matrix, rhs, &x);
        let mut error = f64::INFINITY;
        let mut controller = StepController::new(&self.config);
        let mut next_x = vec![0.0f32; n];
        let mut next_residuals = vec![0.0f32; n];

        for iteration in 1..=self.config.max_iterations {
            let step = controller.step() as f32;
            for i in 0..n {
                next_x[i] = x[i] - residuals[i] * step / diag[i];
            }
            residual::residuals_into(matrix, rhs, &next_x, &mut next_residuals);
            let next_error = residual::mean_squared(&next_residuals);

            if next_error <= self.config.target_error {
                debug!(iteration, error = next_error, "relaxation converged");
                return Ok(DarcySolution {
                    values: next_x,
                    converged: true,
                    iterations: iteration,
                    error: next_error,
                });
            }

            if next_error < error {
                std::mem::swap(&mut x, &mut next_x);
                std::mem::swap(&mut residuals, &mut next_residuals);
                error = next_error;
                controller.relax();
                trace!(iteration, error, step = controller.step(), "accepted");
            } else {
                controller.back_off();
                trace!(iteration, rejected = next_error, step = controller.step(), "backed off");
            }
        }

        let error = residual::mean_squared(&residuals);
        warn!(
            iterations = self.config.max_iterations,
            error,
            target = self.config.target_error,
            "relaxation stopped at iteration limit"
        );
        Ok(DarcySolution {
            values: x,
            converged: false,
            iterations: self.config.max_iterations,
            error,
        })
    }
}

/// `n` evenly spaced values from 1 down to 0 inclusive.
pub fn linear_ramp(n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| (1.0 - i as f64 / last) as f32).collect()
        }
    }
}

/// Diagonal of `matrix`, read through each row's stored diagonal position.
fn diagonal(matrix: &SparseMatrix) -> DarcyResult<Vec<f32>> {
    matrix
        .diagonal_positions()
        .into_iter()
        .enumerate()
        .map(|(row, pos)| match pos.map(|p| matrix.value(p)) {
            Some(d) if d != 0.0 => Ok(d),
            _ => Err(DarcyError::SingularRow(row)),
        })
        .collect()
}
