//! # darcy-algo: Darcy Flow Assembly and Relaxation
//!
//! Discretizes steady-state Darcy flow through a labeled voxel volume and
//! solves it without a general-purpose sparse solver.
//!
//! | Stage | Entry point | Output |
//! |-------|-------------|--------|
//! | Dense assembly | [`assembly::assemble_dense`] | `N × N` system, identity rows for solids |
//! | Sparse assembly | [`assembly::assemble_sparse`] | condensed [`SparseMatrix`](darcy_core::SparseMatrix) + rhs |
//! | Conversion | [`assembly::sparse_from_dense`] | condensed system from a dense one |
//! | Relaxation | [`relaxation::DarcySolver`] | condensed solution + diagnostics |
//! | Pipelines | [`flow::solve_volume`], [`flow::solve_volume_dense`] | raw-order pressure field |
//!
//! ## Physical Model
//!
//! Faces between pore voxels conduct with the harmonic mean of the two
//! conductivities. The z_min plane is held at pressure 1 and the z_max plane
//! at 0, each through a half-cell conductance of `2c`; x/y faces are
//! insulated.
//!
//! ## Example
//!
//! ```rust
//! use darcy_algo::{solve_volume, SolverConfig};
//! use darcy_core::Volume;
//!
//! let volume = Volume::filled([3, 3, 4], 1.0);
//! let field = solve_volume(&volume, SolverConfig::default()).unwrap();
//! assert!(field.converged);
//! // Pressure falls from the inlet plane to the outlet plane
//! assert!(field.pressure[volume.flat_index(1, 1, 0)] > field.pressure[volume.flat_index(1, 1, 3)]);
//! ```

pub mod assembly;
pub mod flow;
pub mod relaxation;

pub use assembly::{
    assemble_dense, assemble_sparse, sparse_from_dense, CondensedIndex, DenseSystem, SparseSystem,
};
pub use flow::{solve_volume, solve_volume_dense, FlowField};
pub use relaxation::{DarcySolution, DarcySolver, SolverConfig};
