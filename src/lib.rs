//! co2-regression: multivariate least-squares regression of vehicle CO2 emissions.
//!
//! Fits an affine model `y ≈ intercept + Σ coefficients[j] · x[j]` from a
//! numeric feature table, predicts from it, and persists it as a frozen,
//! versioned artifact that reproduces predictions bit-exactly.
//!
//! # Key Types
//!
//! - [`RegressionModel`] - High-level model with train/predict/save/load
//! - [`ModelParameters`] - Immutable fitted coefficients and intercept
//! - [`RegressionConfig`] / [`Solver`] - Configuration builder
//! - [`FeatureMatrix`] / [`TargetVector`] - Numeric training data
//!
//! # Training
//!
//! ```
//! use co2_regression::{fit, FeatureMatrix, TargetVector};
//!
//! let x = FeatureMatrix::from_rows(&[[0.0], [1.0], [2.0], [3.0]]).unwrap();
//! let y = TargetVector::from(vec![1.0, 3.0, 5.0, 7.0]);
//!
//! let params = fit(&x, &y).unwrap();
//! let pred = params.predict_row(&[4.0]).unwrap();
//! assert!((pred - 9.0).abs() < 1e-9);
//! ```
//!
//! Column order is the caller's contract: a model must be fed columns in the
//! order it was trained on. See [`vehicle`] for the vehicle dataset's order and
//! fuel-type encoding, and [`RegressionModel::predict_named`] for a checked
//! variant.

// Re-export approx traits for users who want to compare predictions
pub use approx;

pub mod data;
pub mod error;
pub mod io;
pub mod model;
pub mod repr;
pub mod testing;
pub mod training;
pub mod vehicle;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use error::{ArtifactError, Error, Result};

pub use data::{FeatureMatrix, TargetVector};
pub use model::{ModelMeta, RegressionModel};
pub use repr::ModelParameters;
pub use training::{fit, FitSummary, LinearTrainer, Metric, RegressionConfig, Solver};
