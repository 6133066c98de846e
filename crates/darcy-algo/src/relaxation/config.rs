use darcy_core::{DarcyError, DarcyResult};
use serde::{Deserialize, Serialize};

/// Tuning knobs of the relaxation solver.
///
/// Deserializes with per-field defaults, so a TOML table naming only
/// `max_iterations` keeps the other four options at their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Ceiling the step size relaxes toward after each improvement
    pub max_step: f64,
    /// Fraction of the gap to `max_step` closed on each improvement
    pub step_adjustment: f64,
    /// Step size of the first proposal
    pub initial_step: f64,
    /// Proposal budget
    pub max_iterations: usize,
    /// Mean squared residual at which the solve stops early
    pub target_error: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_step: 0.25,
            step_adjustment: 0.25,
            initial_step: 0.125,
            max_iterations: 5000,
            target_error: 1e-7,
        }
    }
}

impl SolverConfig {
    pub fn with_max_step(mut self, max_step: f64) -> Self {
        self.max_step = max_step;
        self
    }

    pub fn with_step_adjustment(mut self, step_adjustment: f64) -> Self {
        self.step_adjustment = step_adjustment;
        self
    }

    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_target_error(mut self, target_error: f64) -> Self {
        self.target_error = target_error;
        self
    }

    /// Reject settings under which the step controller misbehaves.
    pub fn validate(&self) -> DarcyResult<()> {
        if !(self.max_step.is_finite() && self.max_step > 0.0) {
            return Err(DarcyError::Config(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }
        if !(self.initial_step.is_finite() && self.initial_step > 0.0) {
            return Err(DarcyError::Config(format!(
                "initial_step must be positive, got {}",
                self.initial_step
            )));
        }
        if self.initial_step > self.max_step {
            return Err(DarcyError::Config(format!(
                "initial_step {} exceeds max_step {}",
                self.initial_step, self.max_step
            )));
        }
        if !(0.0..=1.0).contains(&self.step_adjustment) {
            return Err(DarcyError::Config(format!(
                "step_adjustment must lie in [0, 1], got {}",
                self.step_adjustment
            )));
        }
        if !(self.target_error.is_finite() && self.target_error >= 0.0) {
            return Err(DarcyError::Config(format!(
                "target_error must be non-negative, got {}",
                self.target_error
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.max_step, 0.25);
        assert_eq!(config.step_adjustment, 0.25);
        assert_eq!(config.initial_step, 0.125);
        assert_eq!(config.max_iterations, 5000);
        assert_eq!(config.target_error, 1e-7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SolverConfig = toml::from_str("max_iterations = 200\ntarget_error = 1e-9\n").unwrap();
        assert_eq!(config.max_iterations, 200);
        assert_eq!(config.target_error, 1e-9);
        assert_eq!(config.max_step, 0.25);
        assert_eq!(config.initial_step, 0.125);
    }

    #[test]
    fn test_validate_rejects_bad_steps() {
        let base = SolverConfig::default();
        assert!(base.with_max_step(0.0).validate().is_err());
        assert!(base.with_initial_step(-0.1).validate().is_err());
        assert!(base.with_initial_step(0.5).validate().is_err());
        assert!(base.with_step_adjustment(1.5).validate().is_err());
        assert!(base.with_target_error(f64::NAN).validate().is_err());
        assert!(base.with_step_adjustment(0.0).validate().is_ok());
    }
}
