//! Configuration for least-squares fitting.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default gradient descent step size.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Default gradient descent iteration bound.
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;
/// Default gradient-norm convergence threshold.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Estimation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solver {
    /// Closed-form least squares via singular value decomposition of the
    /// standardized design matrix.
    #[default]
    Svd,
    /// Deterministic full-batch gradient descent on standardized features.
    ///
    /// Fails with [`Error::NotConverged`] if the gradient norm is still above
    /// `tolerance` after `max_iterations` steps.
    GradientDescent {
        /// Step size (on standardized data).
        learning_rate: f64,
        /// Hard bound on the number of steps.
        max_iterations: usize,
        /// Gradient-norm threshold for convergence.
        tolerance: f64,
    },
}

impl Solver {
    /// Gradient descent with default step size, iteration bound and tolerance.
    pub fn gradient_descent() -> Self {
        Self::GradientDescent {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Short name for logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Svd => "svd",
            Self::GradientDescent { .. } => "gradient_descent",
        }
    }
}

/// Configuration for [`LinearTrainer`](super::LinearTrainer).
///
/// ```
/// use co2_regression::training::{RegressionConfig, Solver};
///
/// let config = RegressionConfig::builder()
///     .solver(Solver::gradient_descent())
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Builder)]
pub struct RegressionConfig {
    /// Estimation strategy (default: SVD).
    #[builder(default)]
    pub solver: Solver,
    /// Smallest accepted ratio of smallest to largest singular value of the
    /// standardized design matrix (default: 1e-10). Below it the system is
    /// treated as singular. Both solvers apply the same test.
    #[builder(default = 1e-10)]
    pub rank_tolerance: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RegressionConfig {
    /// Check that every numeric setting is in range.
    pub fn validate(&self) -> Result<()> {
        if !(self.rank_tolerance > 0.0 && self.rank_tolerance < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "rank_tolerance must be in (0, 1), got {}",
                self.rank_tolerance
            )));
        }

        if let Solver::GradientDescent {
            learning_rate,
            max_iterations,
            tolerance,
        } = self.solver
        {
            if !(learning_rate.is_finite() && learning_rate > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "learning_rate must be positive and finite, got {learning_rate}"
                )));
            }
            if max_iterations == 0 {
                return Err(Error::InvalidConfig("max_iterations must be at least 1".into()));
            }
            if !(tolerance.is_finite() && tolerance > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "tolerance must be positive and finite, got {tolerance}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RegressionConfig::default();
        assert_eq!(config.solver, Solver::Svd);
        assert!((config.rank_tolerance - 1e-10).abs() < 1e-20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let config = RegressionConfig::builder()
            .solver(Solver::GradientDescent {
                learning_rate: 0.05,
                max_iterations: 500,
                tolerance: 1e-6,
            })
            .rank_tolerance(1e-8)
            .build();

        assert_eq!(config.solver.name(), "gradient_descent");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = [
            RegressionConfig::builder().rank_tolerance(0.0).build(),
            RegressionConfig::builder().rank_tolerance(f64::NAN).build(),
            RegressionConfig::builder()
                .solver(Solver::GradientDescent {
                    learning_rate: -1.0,
                    max_iterations: 10,
                    tolerance: 1e-6,
                })
                .build(),
            RegressionConfig::builder()
                .solver(Solver::GradientDescent {
                    learning_rate: 0.1,
                    max_iterations: 0,
                    tolerance: 1e-6,
                })
                .build(),
            RegressionConfig::builder()
                .solver(Solver::GradientDescent {
                    learning_rate: 0.1,
                    max_iterations: 10,
                    tolerance: f64::INFINITY,
                })
                .build(),
        ];

        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn solver_serde() {
        let json = serde_json::to_string(&Solver::Svd).unwrap();
        assert_eq!(json, r#""svd""#);

        let gd = Solver::gradient_descent();
        let parsed: Solver = serde_json::from_str(&serde_json::to_string(&gd).unwrap()).unwrap();
        assert_eq!(parsed, gd);
    }
}
