//! Residual kernel: `r = A·x − b` over the condensed rows.
//!
//! Each row is accumulated sequentially in storage order. With the
//! `parallel` feature rows are distributed over the rayon pool; the per-row
//! arithmetic is unchanged, so both modes give identical bits.

use darcy_core::SparseMatrix;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
const MIN_ROWS_PER_TASK: usize = 512;

#[inline]
fn row_residual(matrix: &SparseMatrix, rhs: &[f32], x: &[f32], row: usize) -> f32 {
    let (start, end) = matrix.row_bounds(row);
    let columns = matrix.column_indices();
    let mut acc = 0.0f32;
    for idx in start..end {
        acc += matrix.value(idx) * x[columns[idx]];
    }
    acc - rhs[row]
}

/// Write `A·x − b` into `out`. All slices must have one entry per row.
pub fn residuals_into(matrix: &SparseMatrix, rhs: &[f32], x: &[f32], out: &mut [f32]) {
    #[cfg(feature = "parallel")]
    out.par_iter_mut()
        .with_min_len(MIN_ROWS_PER_TASK)
        .enumerate()
        .for_each(|(row, r)| *r = row_residual(matrix, rhs, x, row));

    #[cfg(not(feature = "parallel"))]
    for (row, r) in out.iter_mut().enumerate() {
        *r = row_residual(matrix, rhs, x, row);
    }
}

/// Allocate and return `A·x − b`.
pub fn residuals(matrix: &SparseMatrix, rhs: &[f32], x: &[f32]) -> Vec<f32> {
    let mut out = vec![0.0f32; rhs.len()];
    residuals_into(matrix, rhs, x, &mut out);
    out
}

/// Mean of the squared entries, accumulated in `f64`.
///
/// An `f32` sum drops small squares next to large ones, which can flip an
/// accept/reject decision near `target_error` on large systems. Convergence
/// decisions therefore compare a slightly more accurate error than a pure
/// single-precision reduction would give.
pub fn mean_squared(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|&v| (v as f64) * (v as f64)).sum();
    sum / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_residuals_of_small_system() {
        let matrix = SparseMatrix::new(
            vec![-3.0, 1.0, 1.0, -2.0, 1.0, 1.0, -3.0],
            vec![0, 1, 0, 1, 2, 1, 2],
            vec![0, 2, 5],
        )
        .unwrap();
        let rhs = [-2.0, 0.0, 0.0];
        let r = residuals(&matrix, &rhs, &[1.0, 0.5, 0.0]);
        assert_eq!(r, vec![-0.5, 0.0, 0.5]);
        assert!((mean_squared(&r) - 0.5 / 3.0).abs() < 1e-12);

        let exact = [5.0 / 6.0, 0.5, 1.0 / 6.0];
        let r = residuals(&matrix, &rhs, &exact);
        assert!(mean_squared(&r) < 1e-12);
    }

    #[test]
    fn test_mean_squared_keeps_small_terms() {
        // 4096² = 2^24, where one f32 ulp is 2 and 1e-6 would vanish
        let mse = mean_squared(&[4096.0, 1e-3]);
        assert!(mse > 8_388_608.0);
        assert!((mse - (16_777_216.0 + 1e-6) / 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_mean_squared_of_empty_is_zero() {
        assert_eq!(mean_squared(&[]), 0.0);
    }
}
