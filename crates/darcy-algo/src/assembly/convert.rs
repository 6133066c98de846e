//! Dense → condensed sparse conversion.
//!
//! Walks the diagonal of a dense system to find the excluded identity rows
//! (positive diagonal) and re-emits every remaining row's nonzero entries in
//! condensed index space. For a volume, the result equals
//! [`assemble_sparse`](super::sparse::assemble_sparse) exactly; the
//! conversion exists mainly to cross-check the direct path.

use darcy_core::{DarcyError, DarcyResult, SparseMatrix};

use super::dense::DenseSystem;
use super::index::CondensedIndex;
use super::sparse::SparseSystem;

/// Condense a dense system assembled by [`assemble_dense`](super::dense::assemble_dense).
///
/// Diagonal entries of equation rows are kept even when they are zero, so
/// isolated pore voxels still own a row.
pub fn sparse_from_dense(dense: &DenseSystem) -> DarcyResult<SparseSystem> {
    let n = dense.size();
    if dense.matrix.len() != n {
        return Err(DarcyError::DimensionMismatch {
            expected: n,
            actual: dense.matrix.len(),
        });
    }
    if let Some(row) = dense.matrix.iter().find(|row| row.len() != n) {
        return Err(DarcyError::DimensionMismatch {
            expected: n,
            actual: row.len(),
        });
    }

    let index = CondensedIndex::from_diagonal(&dense.diagonal());
    let nnz_estimate = index.n_condensed() * 7;
    let mut values = Vec::with_capacity(nnz_estimate);
    let mut column_indices = Vec::with_capacity(nnz_estimate);
    let mut row_starts = Vec::with_capacity(index.n_condensed());
    let mut rhs = Vec::with_capacity(index.n_condensed());

    for &i in index.pore_voxels() {
        row_starts.push(values.len());
        for (j, &value) in dense.matrix[i].iter().enumerate() {
            if value == 0.0 && j != i {
                continue;
            }
            let col = index.condensed(j).ok_or_else(|| {
                DarcyError::MalformedMatrix(format!(
                    "row {i} couples to excluded row {j}"
                ))
            })?;
            values.push(value);
            column_indices.push(col);
        }
        rhs.push(dense.rhs[i]);
    }

    let matrix = SparseMatrix::new(values, column_indices, row_starts)?;
    Ok(SparseSystem { matrix, rhs, index })
}
