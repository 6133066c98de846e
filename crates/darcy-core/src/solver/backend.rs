use faer::{prelude::*, solvers::PartialPivLu, Mat};

use crate::error::{DarcyError, DarcyResult};

/// Trait for solving dense linear systems (Ax = b).
///
/// Inputs follow the single-precision storage of assembled systems; the
/// elimination itself runs in `f64`.
pub trait LinearSystemBackend: Send + Sync {
    /// Solve the linear system Ax = b
    fn solve(&self, matrix: &[Vec<f32>], rhs: &[f32]) -> DarcyResult<Vec<f64>>;
}

fn check_dimensions(matrix: &[Vec<f32>], rhs: &[f32]) -> DarcyResult<()> {
    let n = matrix.len();
    if rhs.len() != n {
        return Err(DarcyError::DimensionMismatch {
            expected: n,
            actual: rhs.len(),
        });
    }
    if let Some(row) = matrix.iter().find(|row| row.len() != n) {
        return Err(DarcyError::DimensionMismatch {
            expected: n,
            actual: row.len(),
        });
    }
    Ok(())
}

/// Pivots smaller than this are treated as zero.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Row-pivoted elimination on the augmented matrix `[A | b]` followed by back
/// substitution.
#[derive(Debug, Clone, Default)]
pub struct GaussSolver;

impl LinearSystemBackend for GaussSolver {
    fn solve(&self, matrix: &[Vec<f32>], rhs: &[f32]) -> DarcyResult<Vec<f64>> {
        check_dimensions(matrix, rhs)?;
        let n = matrix.len();

        let mut rows: Vec<Vec<f64>> = matrix
            .iter()
            .zip(rhs)
            .map(|(row, &b)| {
                row.iter()
                    .map(|&v| v as f64)
                    .chain(std::iter::once(b as f64))
                    .collect()
            })
            .collect();

        for col in 0..n {
            let pivot = (col..n)
                .max_by(|&p, &q| rows[p][col].abs().total_cmp(&rows[q][col].abs()))
                .unwrap_or(col);
            if rows[pivot][col].abs() < PIVOT_TOLERANCE {
                return Err(DarcyError::Solver(format!(
                    "singular matrix (zero pivot in column {col})"
                )));
            }
            rows.swap(col, pivot);

            let (done, below) = rows.split_at_mut(col + 1);
            let pivot_row = &done[col];
            for row in below.iter_mut() {
                let factor = row[col] / pivot_row[col];
                // Identity rows of solid voxels have nothing to eliminate
                if factor == 0.0 {
                    continue;
                }
                for (target, &p) in row[col..].iter_mut().zip(&pivot_row[col..]) {
                    *target -= factor * p;
                }
            }
        }

        let mut x = vec![0.0f64; n];
        for i in (0..n).rev() {
            let row = &rows[i];
            let known: f64 = row[i + 1..n].iter().zip(&x[i + 1..]).map(|(a, v)| a * v).sum();
            x[i] = (row[n] - known) / row[i];
        }
        Ok(x)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FaerSolver;

impl LinearSystemBackend for FaerSolver {
    fn solve(&self, matrix: &[Vec<f32>], rhs: &[f32]) -> DarcyResult<Vec<f64>> {
        check_dimensions(matrix, rhs)?;
        let n = matrix.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mat = Mat::from_fn(n, n, |i, j| matrix[i][j] as f64);
        let rhs_mat = Mat::from_fn(n, 1, |i, _| rhs[i] as f64);
        let lu = PartialPivLu::new(mat.as_ref());
        let sol = lu.solve(&rhs_mat);

        let mut solution = Vec::with_capacity(n);
        for i in 0..n {
            let value = sol.read(i, 0);
            if !value.is_finite() {
                return Err(DarcyError::Solver(format!(
                    "non-finite solution component {i} (singular matrix)"
                )));
            }
            solution.push(value);
        }
        Ok(solution)
    }
}
