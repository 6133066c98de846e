//! Dense reference assembly.
//!
//! Every voxel gets a row, so the matrix is `N × N` for `N = W·H·D`. Solid
//! voxels receive identity rows with a zero right-hand side. Memory is
//! quadratic in the voxel count; use it to verify the sparse path or to feed
//! a dense backend on small volumes.

use darcy_core::{DarcyResult, Volume};
use serde::Serialize;
use tracing::debug;

use super::stencil::StencilBuilder;

/// Full `(A, b)` pair in raw voxel order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenseSystem {
    pub matrix: Vec<Vec<f32>>,
    pub rhs: Vec<f32>,
}

impl DenseSystem {
    pub fn size(&self) -> usize {
        self.rhs.len()
    }

    /// Main diagonal of the matrix.
    pub fn diagonal(&self) -> Vec<f32> {
        self.matrix
            .iter()
            .enumerate()
            .map(|(i, row)| row[i])
            .collect()
    }
}

/// Assemble the dense system of `volume`.
pub fn assemble_dense(volume: &Volume) -> DarcyResult<DenseSystem> {
    volume.validate()?;
    let n = volume.len();
    let mut matrix = vec![vec![0.0f32; n]; n];
    let mut rhs = vec![0.0f32; n];

    let builder = StencilBuilder::new(volume);
    for raw in 0..n {
        let Some(stencil) = builder.voxel_stencil(raw) else {
            matrix[raw][raw] = 1.0;
            continue;
        };
        let row = &mut matrix[raw];
        for &(neighbour, conductance) in stencil.neighbours() {
            row[neighbour] = conductance;
        }
        row[raw] = stencil.diagonal;
        rhs[raw] = stencil.rhs;
    }

    debug!(
        voxels = n,
        pores = volume.pore_count(),
        "assembled dense system"
    );
    Ok(DenseSystem { matrix, rhs })
}
