//! Adaptive step size.
//!
//! Two branches, applied after every proposal:
//!
//! ```text
//! improved:   step ← step + (max_step − step) · adjustment
//! regressed:  step ← 1 / (2/step + 1/max_step)
//! ```
//!
//! The first closes a fixed fraction of the gap to the ceiling and never
//! crosses it. The second is a harmonic back-off that more than halves the
//! step each time while keeping it positive.

use super::config::SolverConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepController {
    step: f64,
    max_step: f64,
    adjustment: f64,
}

impl StepController {
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            step: config.initial_step,
            max_step: config.max_step,
            adjustment: config.step_adjustment,
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Proposal accepted: move toward `max_step`.
    pub fn relax(&mut self) {
        self.step += (self.max_step - self.step) * self.adjustment;
    }

    /// Proposal rejected: harmonic back-off.
    pub fn back_off(&mut self) {
        let reciprocal = 1.0 / self.step;
        self.step = 1.0 / (2.0 * reciprocal + 1.0 / self.max_step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> StepController {
        StepController::new(&SolverConfig::default())
    }

    #[test]
    fn test_relax_approaches_ceiling() {
        let mut ctl = controller();
        ctl.relax();
        assert!((ctl.step() - (0.125 + 0.125 * 0.25)).abs() < 1e-15);
        for _ in 0..200 {
            ctl.relax();
            assert!(ctl.step() <= 0.25);
        }
        assert!((ctl.step() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_back_off_formula() {
        let mut ctl = controller();
        ctl.back_off();
        // 1 / (2 * 8 + 4)
        assert!((ctl.step() - 0.05).abs() < 1e-15);
        ctl.back_off();
        // 1 / (2 * 20 + 4)
        assert!((ctl.step() - 1.0 / 44.0).abs() < 1e-15);
    }

    #[test]
    fn test_back_off_is_monotone_and_positive() {
        let mut ctl = controller();
        let mut previous = ctl.step();
        for _ in 0..30 {
            ctl.back_off();
            assert!(ctl.step() > 0.0);
            assert!(ctl.step() < previous / 2.0);
            previous = ctl.step();
        }
    }
}
