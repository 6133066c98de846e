use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Darcy flow through labeled voxel volumes", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    /// Solver configuration file (TOML); defaults to ~/.darcy/config.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble the linear system of a volume and write it as JSON
    Assemble {
        /// Volume JSON file
        volume: PathBuf,
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Emit the full dense system instead of the condensed sparse one
        #[arg(long)]
        dense: bool,
    },
    /// Solve for the pressure field of a volume
    Solve {
        /// Volume JSON file
        volume: PathBuf,
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Solution method
        #[arg(long, value_enum, default_value_t = SolveBackend::Relaxation)]
        backend: SolveBackend,
        #[command(flatten)]
        overrides: SolverOverrides,
        /// Worker threads for residual evaluation ("auto" or a count)
        #[arg(long, default_value = "auto")]
        threads: String,
    },
    /// Print voxel and system statistics for a volume
    Inspect {
        /// Volume JSON file
        volume: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveBackend {
    /// Adaptive-step relaxation on the condensed sparse system
    Relaxation,
    /// Dense Gaussian elimination (small volumes only)
    Gauss,
    /// Dense faer LU (small volumes only)
    Faer,
}

impl SolveBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveBackend::Relaxation => "relaxation",
            SolveBackend::Gauss => "gauss",
            SolveBackend::Faer => "faer",
        }
    }
}

/// Per-run overrides of the `[solver]` configuration table.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SolverOverrides {
    /// Step size ceiling
    #[arg(long)]
    pub max_step: Option<f64>,
    /// Fraction of the gap to max_step closed after an improvement
    #[arg(long)]
    pub step_adjustment: Option<f64>,
    /// Starting step size
    #[arg(long)]
    pub initial_step: Option<f64>,
    /// Iteration budget
    #[arg(long)]
    pub max_iterations: Option<usize>,
    /// Mean squared residual convergence threshold
    #[arg(long)]
    pub target_error: Option<f64>,
}
