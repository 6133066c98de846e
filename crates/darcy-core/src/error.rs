//! Unified error type for the darcy workspace
//!
//! Every fallible operation in the library crates returns [`DarcyResult`].
//! The CLI wraps these in `anyhow` at the process boundary.
//!
//! # Example
//!
//! ```ignore
//! use darcy_core::{DarcyError, DarcyResult};
//!
//! fn pressure_field(path: &str) -> DarcyResult<Vec<f32>> {
//!     let volume = read_volume(path)?;
//!     let system = assemble_sparse(&volume)?;
//!     Ok(DarcySolver::new().solve(&system.matrix, &system.rhs, None)?.values)
//! }
//! ```

use thiserror::Error;

/// Unified error type for all darcy operations.
#[derive(Error, Debug)]
pub enum DarcyError {
    /// Write to a sparse position that was not allocated at assembly time
    #[error("Cannot assign value to uninitiated index ({row}, {col})")]
    StructuralViolation { row: usize, col: usize },

    /// Inconsistent row-compressed arrays
    #[error("Malformed sparse matrix: {0}")]
    MalformedMatrix(String),

    /// Volume rejected before assembly
    #[error("Invalid volume: {0}")]
    InvalidVolume(String),

    /// Vector or matrix dimensions disagree
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Condensed row with a zero diagonal (pore voxel with no conducting face)
    #[error("Row {0} has a zero diagonal")]
    SingularRow(usize),

    /// Dense backend failures
    #[error("Solver error: {0}")]
    Solver(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience type alias for Results using DarcyError.
pub type DarcyResult<T> = Result<T, DarcyError>;

impl From<serde_json::Error> for DarcyError {
    fn from(err: serde_json::Error) -> Self {
        DarcyError::Parse(err.to_string())
    }
}
