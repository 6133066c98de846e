//! Persistent solver settings.
//!
//! ```toml
//! [solver]
//! max_iterations = 10000
//! target_error = 1e-9
//! ```
//!
//! Missing keys keep their defaults. Command line overrides win over the file.

use anyhow::{Context, Result};
use darcy_algo::SolverConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::SolverOverrides;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DarcyConfig {
    pub solver: SolverConfig,
}

impl DarcyConfig {
    /// Get the default config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".darcy"))
    }

    /// Get the default config file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load configuration from the default location.
    ///
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Explicit path if given, otherwise the default location.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Solver settings with command line overrides applied.
    pub fn solver_with(&self, overrides: &SolverOverrides) -> SolverConfig {
        let mut config = self.solver;
        if let Some(v) = overrides.max_step {
            config.max_step = v;
        }
        if let Some(v) = overrides.step_adjustment {
            config.step_adjustment = v;
        }
        if let Some(v) = overrides.initial_step {
            config.initial_step = v;
        }
        if let Some(v) = overrides.max_iterations {
            config.max_iterations = v;
        }
        if let Some(v) = overrides.target_error {
            config.target_error = v;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: DarcyConfig = toml::from_str("[solver]\nmax_iterations = 42\n").unwrap();
        assert_eq!(config.solver.max_iterations, 42);
        assert_eq!(config.solver.max_step, 0.25);

        let empty: DarcyConfig = toml::from_str("").unwrap();
        assert_eq!(empty, DarcyConfig::default());
    }

    #[test]
    fn test_overrides_win() {
        let config: DarcyConfig = toml::from_str("[solver]\ntarget_error = 1e-9\n").unwrap();
        let overrides = SolverOverrides {
            target_error: Some(1e-5),
            initial_step: Some(0.2),
            ..Default::default()
        };
        let solver = config.solver_with(&overrides);
        assert_eq!(solver.target_error, 1e-5);
        assert_eq!(solver.initial_step, 0.2);
        assert_eq!(solver.max_iterations, 5000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = DarcyConfig::default();
        config.solver.max_iterations = 7;
        config.save_to(&path).unwrap();
        assert_eq!(DarcyConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_rejects_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[solver]\nmax_iterations = \"many\"").unwrap();
        assert!(DarcyConfig::load_from(file.path()).is_err());
    }
}
