//! Numeric inputs to the regression engine.
//!
//! - [`FeatureMatrix`]: `n × p` row-major feature table
//! - [`TargetVector`]: `n` targets aligned with the feature rows
//!
//! Both are thin wrappers over `ndarray` storage. They guarantee shape
//! (a feature matrix is always rectangular) but not finiteness: NaN and
//! infinity are rejected by [`fit`](crate::training::LinearTrainer::fit) and
//! [`predict`](crate::repr::ModelParameters::predict), which report the
//! offending position.
//!
//! Categorical features must already be numerically encoded by the caller.

mod matrix;
mod targets;

pub use matrix::FeatureMatrix;
pub use targets::TargetVector;
