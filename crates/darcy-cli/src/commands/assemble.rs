use std::path::Path;

use anyhow::Result;
use darcy_algo::{assemble_dense, assemble_sparse};
use serde::Serialize;

use super::util::{emit, load_volume};

#[derive(Serialize)]
struct CondensedSystem<'a> {
    rows: usize,
    nnz: usize,
    values: &'a [f32],
    column_indices: &'a [usize],
    row_starts: &'a [usize],
    rhs: &'a [f32],
    nulls_count: &'a [usize],
}

pub fn handle(volume: &Path, out: Option<&Path>, dense: bool) -> Result<()> {
    let volume = load_volume(volume)?;
    if dense {
        let system = assemble_dense(&volume)?;
        return emit(&system, out);
    }

    let system = assemble_sparse(&volume)?;
    let report = CondensedSystem {
        rows: system.size(),
        nnz: system.matrix.nnz(),
        values: system.matrix.values(),
        column_indices: system.matrix.column_indices(),
        row_starts: system.matrix.row_starts(),
        rhs: &system.rhs,
        nulls_count: system.index.nulls_count(),
    };
    emit(&report, out)
}
