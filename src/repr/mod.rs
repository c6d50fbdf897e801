//! Raw model representation.
//!
//! [`ModelParameters`] is the minimal inference state: `p` coefficients and
//! an intercept. Prediction is a dot product:
//!
//! ```text
//! output = intercept + Σ(feature[i] × coefficient[i])
//! ```

mod params;

pub use params::ModelParameters;
