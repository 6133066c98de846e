//! Dense reference solvers for assembled linear systems.
//!
//! These are exact direct methods used to validate the iterative solver and
//! to solve small volumes outright. They work on the full dense system, so
//! memory grows with the square of the voxel count.

pub mod backend;
pub mod registry;

pub use backend::{FaerSolver, GaussSolver, LinearSystemBackend};
pub use registry::BackendKind;
