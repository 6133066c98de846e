//! # Finite-Difference Assembly
//!
//! Turns a conductivity [`Volume`](darcy_core::Volume) into a linear system
//! for the steady-state pressure field.
//!
//! ## Module Organization
//!
//! - [`neighbours`]: boundary masks and the 64-entry face table
//! - [`stencil`]: harmonic-mean face conductances and z-boundary terms
//! - [`index`]: raw ↔ condensed index translation (`nulls_count`)
//! - [`dense`]: full `N × N` reference system with identity rows for solids
//! - [`sparse`]: condensed row-compressed system, solids removed
//! - [`convert`]: dense → condensed conversion used to cross-check [`sparse`]
//!
//! ## Usage
//!
//! ```rust
//! use darcy_algo::assembly::{assemble_dense, assemble_sparse, sparse_from_dense};
//! use darcy_core::Volume;
//!
//! let mut volume = Volume::filled([4, 4, 4], 1.0);
//! volume.set(1, 1, 1, 0.0);
//!
//! let system = assemble_sparse(&volume).unwrap();
//! assert_eq!(system.matrix.n_rows(), 63);
//!
//! let converted = sparse_from_dense(&assemble_dense(&volume).unwrap()).unwrap();
//! assert_eq!(converted, system);
//! ```

pub mod convert;
pub mod dense;
pub mod index;
pub mod neighbours;
pub mod sparse;
pub mod stencil;

pub use convert::sparse_from_dense;
pub use dense::{assemble_dense, DenseSystem};
pub use index::CondensedIndex;
pub use neighbours::{BoundaryMask, NeighbourTable};
pub use sparse::{assemble_sparse, SparseSystem};
pub use stencil::{harmonic_mean, voxel_stencil, StencilBuilder, VoxelStencil};
