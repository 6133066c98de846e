//! Direct assembly of the condensed sparse system.
//!
//! Solid voxels are dropped from both row and column space. Each row is
//! appended as its off-diagonal entries in face order followed by the
//! diagonal; [`SparseMatrix::new`] then sorts every row by column.

use darcy_core::{DarcyError, DarcyResult, SparseMatrix, Volume};
use tracing::debug;

use super::index::CondensedIndex;
use super::stencil::StencilBuilder;

/// Condensed `(A, b)` pair plus the index map back to raw voxels.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseSystem {
    pub matrix: SparseMatrix,
    pub rhs: Vec<f32>,
    pub index: CondensedIndex,
}

impl SparseSystem {
    pub fn size(&self) -> usize {
        self.rhs.len()
    }
}

/// Assemble the condensed sparse system of `volume`.
pub fn assemble_sparse(volume: &Volume) -> DarcyResult<SparseSystem> {
    volume.validate()?;
    let index = CondensedIndex::from_volume(volume);
    let n = index.n_condensed();

    let mut values = Vec::with_capacity(n * 7);
    let mut column_indices = Vec::with_capacity(n * 7);
    let mut row_starts = Vec::with_capacity(n);
    let mut rhs = Vec::with_capacity(n);

    let builder = StencilBuilder::new(volume);
    for stencil in builder.pore_stencils() {
        row_starts.push(values.len());
        for &(neighbour, conductance) in stencil.neighbours() {
            values.push(conductance);
            column_indices.push(condensed_column(&index, neighbour)?);
        }
        values.push(stencil.diagonal);
        column_indices.push(condensed_column(&index, stencil.raw)?);
        rhs.push(stencil.rhs);
    }

    let matrix = SparseMatrix::new(values, column_indices, row_starts)?;
    debug!(
        voxels = volume.len(),
        rows = matrix.n_rows(),
        nnz = matrix.nnz(),
        "assembled sparse system"
    );
    Ok(SparseSystem { matrix, rhs, index })
}

fn condensed_column(index: &CondensedIndex, raw: usize) -> DarcyResult<usize> {
    index.condensed(raw).ok_or_else(|| {
        DarcyError::MalformedMatrix(format!("column refers to solid voxel {raw}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shape (2, 1, 2) with one solid voxel at (1, 0, 0):
    ///
    /// ```text
    ///   z=0  z=1
    ///   1    2     x=0
    ///   0    1     x=1
    /// ```
    fn two_by_two() -> Volume {
        Volume::new([2, 1, 2], vec![1.0, 2.0, 0.0, 1.0]).unwrap()
    }

    #[test]
    fn test_hand_assembled_layout() {
        let system = assemble_sparse(&two_by_two()).unwrap();
        let third = 4.0f32 / 3.0;

        assert_eq!(system.index.nulls_count(), &[0, 0, 1, 1]);
        assert_eq!(system.matrix.row_starts(), &[0, 2, 5]);
        assert_eq!(system.matrix.column_indices(), &[0, 1, 0, 1, 2, 1, 2]);
        assert_eq!(system.rhs, vec![-2.0, 0.0, 0.0]);

        let expected = [
            -(2.0 + third),
            third,
            third,
            -(4.0 + third + third),
            third,
            third,
            -(2.0 + third),
        ];
        for (k, (&actual, &want)) in system.matrix.values().iter().zip(&expected).enumerate() {
            assert!((actual - want).abs() < 1e-6, "value {k}: {actual} vs {want}");
        }
    }

    #[test]
    fn test_conductance_symmetry() {
        let volume = Volume::from_fn([3, 3, 3], |x, y, z| 0.5 + ((x + 2 * y + 3 * z) % 5) as f32);
        let system = assemble_sparse(&volume).unwrap();
        let matrix = &system.matrix;
        for span in matrix.rows() {
            for (col, value) in matrix.row_iter(span.row) {
                if col == span.row {
                    continue;
                }
                assert_eq!(value, matrix.get(col, span.row));
                let ci = volume.data()[system.index.raw_index(span.row).unwrap()];
                let cj = volume.data()[system.index.raw_index(col).unwrap()];
                let expected = 2.0 / (1.0 / ci as f64 + 1.0 / cj as f64);
                assert!((value as f64 - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_every_row_has_negative_diagonal() {
        let mut volume = Volume::filled([4, 3, 3], 1.0);
        volume.set(2, 1, 1, 0.0);
        let system = assemble_sparse(&volume).unwrap();
        assert_eq!(system.size(), 35);
        for (row, pos) in system.matrix.diagonal_positions().into_iter().enumerate() {
            let pos = pos.expect("diagonal stored");
            assert!(system.matrix.value(pos) < 0.0, "row {row}");
        }
    }

    #[test]
    fn test_rejects_all_solid_volume() {
        let err = assemble_sparse(&Volume::filled([2, 2, 2], 0.0)).unwrap_err();
        assert!(matches!(err, DarcyError::InvalidVolume(_)));
    }
}
