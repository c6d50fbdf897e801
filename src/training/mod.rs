//! Parameter estimation.
//!
//! [`LinearTrainer`] fits [`ModelParameters`](crate::repr::ModelParameters)
//! by ordinary least squares, using one of two strategies selected by
//! [`Solver`]:
//!
//! - [`Solver::Svd`] (default): closed-form solve via singular value
//!   decomposition of the standardized design matrix
//! - [`Solver::GradientDescent`]: bounded, deterministic full-batch descent
//!
//! Both report rank-deficient data (`n ≤ p`, constant or linearly dependent
//! columns) as [`Error::SingularSystem`](crate::Error::SingularSystem).

mod config;
mod descent;
mod lstsq;
mod scaling;
pub mod metrics;
mod trainer;

pub use config::{
    RegressionConfig, Solver, DEFAULT_LEARNING_RATE, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
pub use metrics::{Mae, Metric, RSquared, Rmse};
pub use trainer::{FitSummary, LinearTrainer};

use crate::data::{FeatureMatrix, TargetVector};
use crate::error::Result;
use crate::repr::ModelParameters;

/// Fit with the default configuration (closed-form SVD).
pub fn fit(features: &FeatureMatrix, targets: &TargetVector) -> Result<ModelParameters> {
    LinearTrainer::default().fit(features, targets)
}
