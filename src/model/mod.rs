//! High-level model API.
//!
//! [`RegressionModel`] is what callers train, persist and predict with: the
//! fitted [`ModelParameters`](crate::repr::ModelParameters) plus a
//! [`ModelMeta`] holding optional column names and fit diagnostics.
//!
//! # Training
//!
//! ```
//! use co2_regression::data::{FeatureMatrix, TargetVector};
//! use co2_regression::model::RegressionModel;
//! use co2_regression::training::RegressionConfig;
//!
//! let x = FeatureMatrix::from_rows(&[[0.0, 1.0], [1.0, 0.0], [2.0, 2.0], [3.0, 1.0]]).unwrap();
//! let y = TargetVector::from(vec![1.0, 3.0, 4.0, 7.0]);
//!
//! let model = RegressionModel::train(&x, &y, RegressionConfig::default())
//!     .unwrap()
//!     .with_feature_names(["ENGINESIZE", "CYLINDERS"])
//!     .unwrap();
//! assert_eq!(model.n_features(), 2);
//! ```

pub mod meta;
mod regression;

pub use meta::ModelMeta;
pub use regression::RegressionModel;
