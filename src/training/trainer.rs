//! Least-squares trainer.
//!
//! Orchestrates a fit:
//! 1. Validate shapes, finiteness and configuration
//! 2. Solve for the intercept and coefficients with the configured [`Solver`]
//! 3. Score the fit on the training data
//!
//! Every call works on local state and returns a fresh [`ModelParameters`];
//! a failed call returns no parameters at all.

use serde::{Deserialize, Serialize};

use crate::data::{FeatureMatrix, TargetVector};
use crate::error::{Error, Result};
use crate::repr::ModelParameters;

use super::descent::solve_gradient_descent;
use super::lstsq::solve_svd;
use super::metrics::{Metric, RSquared, Rmse};
use super::{RegressionConfig, Solver};

/// Condition ratio below which a solvable system is reported as ill-conditioned.
const ILL_CONDITIONED_RATIO: f64 = 1e-8;

/// Training-set diagnostics of a fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    /// Number of training rows.
    pub n_samples: usize,
    /// Solver that produced the parameters.
    pub solver: Solver,
    /// Root mean squared error on the training data.
    pub rmse: f64,
    /// Coefficient of determination on the training data.
    pub r_squared: f64,
    /// `σ_min / σ_max` of the standardized design matrix.
    pub condition_ratio: f64,
    /// Steps taken (gradient descent only).
    pub iterations: Option<usize>,
}

/// Fits [`ModelParameters`] by ordinary least squares.
///
/// # Example
///
/// ```
/// use co2_regression::data::{FeatureMatrix, TargetVector};
/// use co2_regression::training::{LinearTrainer, RegressionConfig};
///
/// let x = FeatureMatrix::from_rows(&[[0.0], [1.0], [2.0], [3.0]]).unwrap();
/// let y = TargetVector::from(vec![1.0, 3.0, 5.0, 7.0]);
///
/// let params = LinearTrainer::new(RegressionConfig::default()).fit(&x, &y).unwrap();
/// assert!((params.coefficient(0) - 2.0).abs() < 1e-9);
/// assert!((params.intercept() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearTrainer {
    config: RegressionConfig,
}

impl LinearTrainer {
    /// Create a trainer with the given configuration.
    pub fn new(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegressionConfig {
        &self.config
    }

    /// Fit parameters minimizing `‖X·coefficients + intercept − y‖²`.
    pub fn fit(&self, features: &FeatureMatrix, targets: &TargetVector) -> Result<ModelParameters> {
        self.fit_with_summary(features, targets)
            .map(|(params, _)| params)
    }

    /// Fit and also return training-set diagnostics.
    pub fn fit_with_summary(
        &self,
        features: &FeatureMatrix,
        targets: &TargetVector,
    ) -> Result<(ModelParameters, FitSummary)> {
        self.validate_inputs(features, targets)?;

        let n_samples = features.n_samples();
        let n_features = features.n_features();
        let solver = self.config.solver;

        tracing::debug!(n_samples, n_features, solver = solver.name(), "fitting linear model");

        let (params, condition_ratio, iterations) = match solver {
            Solver::Svd => {
                let solution = solve_svd(features.view(), targets.view(), self.config.rank_tolerance)?;
                (
                    ModelParameters::new(solution.coefficients, solution.intercept),
                    solution.condition_ratio,
                    None,
                )
            }
            Solver::GradientDescent {
                learning_rate,
                max_iterations,
                tolerance,
            } => {
                let solution = solve_gradient_descent(
                    features.view(),
                    targets.view(),
                    learning_rate,
                    max_iterations,
                    tolerance,
                    self.config.rank_tolerance,
                )?;
                (
                    ModelParameters::new(solution.coefficients, solution.intercept),
                    solution.condition_ratio,
                    Some(solution.iterations),
                )
            }
        };

        if condition_ratio < ILL_CONDITIONED_RATIO {
            tracing::warn!(
                condition_ratio,
                "design matrix is ill-conditioned; coefficients may be unstable"
            );
        }

        let predictions = params.predict(features)?;
        let rmse = Rmse.compute(predictions.view(), targets.view());
        let r_squared = RSquared.compute(predictions.view(), targets.view());

        tracing::info!(
            n_samples,
            n_features,
            solver = solver.name(),
            rmse,
            r_squared,
            "fitted linear model"
        );

        let summary = FitSummary {
            n_samples,
            solver,
            rmse,
            r_squared,
            condition_ratio,
            iterations,
        };
        Ok((params, summary))
    }

    fn validate_inputs(&self, features: &FeatureMatrix, targets: &TargetVector) -> Result<()> {
        if features.n_features() == 0 {
            return Err(Error::DimensionMismatch {
                context: "feature columns (minimum)".into(),
                expected: 1,
                actual: 0,
            });
        }
        if targets.len() != features.n_samples() {
            return Err(Error::DimensionMismatch {
                context: "targets".into(),
                expected: features.n_samples(),
                actual: targets.len(),
            });
        }
        features.ensure_finite()?;
        targets.ensure_finite()?;
        self.config.validate()
    }
}
