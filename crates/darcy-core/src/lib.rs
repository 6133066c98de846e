//! # darcy-core: Volumes and Sparse Storage for Darcy Flow
//!
//! Provides the data model shared by the assembly and solver crates:
//!
//! - [`Volume`]: a `(W, H, D)` grid of conductivities, zero marking solid voxels
//! - [`SparseMatrix`]: fixed-layout row-compressed storage with sorted rows
//! - [`solver`]: dense direct backends used as exact references
//! - [`DarcyError`]: the error type every library operation returns
//!
//! ## Quick Start
//!
//! ```rust
//! use darcy_core::{SparseMatrix, Volume};
//!
//! let mut volume = Volume::filled([4, 4, 4], 1.0);
//! volume.set(1, 1, 1, 0.0);
//! assert_eq!(volume.pore_count(), 63);
//!
//! let mut matrix = SparseMatrix::new(
//!     vec![-2.0, 1.0, 1.0, -2.0],
//!     vec![0, 1, 0, 1],
//!     vec![0, 2],
//! )
//! .unwrap();
//! matrix.set(1, 1, -3.0).unwrap();
//! assert_eq!(matrix.get(1, 1), -3.0);
//! assert!(matrix.set(0, 5, 1.0).is_err());
//! ```

pub mod error;
pub mod io;
pub mod solver;
pub mod sparse;
pub mod volume;

pub use error::{DarcyError, DarcyResult};
pub use sparse::{RowSpan, RowSpans, SparseMatrix};
pub use volume::{Shape, Volume};
