//! Volume statistics.

use std::path::Path;

use anyhow::Result;
use darcy_algo::assemble_sparse;

use super::util::load_volume;

pub fn handle(volume: &Path) -> Result<()> {
    let volume = load_volume(volume)?;
    let [w, h, d] = volume.shape();
    let system = assemble_sparse(&volume)?;
    let matrix = &system.matrix;

    println!("Shape: {w} x {h} x {d}");
    println!("Voxels: {}", volume.len());
    println!("Pores: {}", volume.pore_count());
    println!("Porosity: {:.4}", volume.porosity());
    println!("Rows: {}", matrix.n_rows());
    println!("Nonzeros: {}", matrix.nnz());
    println!("Density: {:.6}", matrix.density());
    println!("Memory: {} bytes", matrix.memory_bytes());
    Ok(())
}
