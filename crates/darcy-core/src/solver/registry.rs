use super::backend::{FaerSolver, GaussSolver, LinearSystemBackend};
use crate::error::{DarcyError, DarcyResult};
use std::str::FromStr;
use std::sync::Arc;

/// Registry of available dense backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Gauss,
    Faer,
}

impl FromStr for BackendKind {
    type Err = DarcyError;

    fn from_str(input: &str) -> DarcyResult<Self> {
        match input.to_ascii_lowercase().as_str() {
            "gauss" | "default" => Ok(BackendKind::Gauss),
            "faer" => Ok(BackendKind::Faer),
            other => Err(DarcyError::Config(format!(
                "unknown dense backend '{}'; supported values: {}",
                other,
                Self::available().join(", ")
            ))),
        }
    }
}

impl BackendKind {
    pub fn build_solver(self) -> Arc<dyn LinearSystemBackend> {
        match self {
            BackendKind::Gauss => Arc::new(GaussSolver),
            BackendKind::Faer => Arc::new(FaerSolver),
        }
    }

    pub fn available() -> &'static [&'static str] {
        &["gauss", "faer"]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Gauss => "gauss",
            BackendKind::Faer => "faer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_kind_parsing_supports_all_engines() {
        assert_eq!("gauss".parse::<BackendKind>().unwrap(), BackendKind::Gauss);
        assert_eq!("FAER".parse::<BackendKind>().unwrap(), BackendKind::Faer);
        assert!("unknown".parse::<BackendKind>().is_err());
    }

    #[test]
    fn backend_options_solve_diagonal_system() {
        let matrix = vec![vec![2.0, 0.0], vec![0.0, 4.0]];
        let rhs = vec![4.0, 6.0];

        for name in BackendKind::available() {
            let kind: BackendKind = name.parse().unwrap();
            let solution = kind.build_solver().solve(&matrix, &rhs).unwrap();
            assert_eq!(solution, vec![2.0, 1.5], "backend {}", kind.as_str());
        }
    }
}
