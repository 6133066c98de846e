pub mod cli;
pub mod config;

pub use cli::{Cli, Commands, SolveBackend, SolverOverrides};
pub use config::DarcyConfig;
