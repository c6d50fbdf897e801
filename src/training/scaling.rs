//! Column standardization and the rank test shared by both solvers.
//!
//! Both solvers fit on the z-scored design `Z = (X − μ) / σ`, so the rank
//! decision depends only on the directions of the centered columns and never
//! on their units or offsets.

use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{Error, Result};

/// Column means and population standard deviations.
#[derive(Debug, Clone)]
pub(crate) struct Standardization {
    pub means: Array1<f64>,
    pub scales: Array1<f64>,
}

impl Standardization {
    /// Fails with [`Error::SingularSystem`] on a constant column, which is
    /// collinear with the intercept.
    pub fn fit(features: ArrayView2<'_, f64>) -> Result<Self> {
        let n = features.nrows() as f64;
        let means = features
            .mean_axis(Axis(0))
            .ok_or_else(|| Error::SingularSystem {
                reason: "no samples".into(),
            })?;

        let mut scales = Array1::zeros(features.ncols());
        for (j, column) in features.axis_iter(Axis(1)).enumerate() {
            let mu = means[j];
            let var = column.iter().map(|&v| (v - mu) * (v - mu)).sum::<f64>() / n;
            let sd = var.sqrt();
            // Relative to the mean so the test is unit-free.
            if !(sd > f64::EPSILON * mu.abs()) {
                return Err(Error::SingularSystem {
                    reason: format!("feature column {j} is constant (collinear with the intercept)"),
                });
            }
            scales[j] = sd;
        }

        Ok(Self { means, scales })
    }

    pub fn transform(&self, features: ArrayView2<'_, f64>) -> Array2<f64> {
        (&features - &self.means) / &self.scales
    }

    /// Map coefficients of the standardized problem back to raw units.
    ///
    /// `weights` solve `Z·w ≈ (y − ȳ) / y_scale`.
    pub fn unscale(&self, weights: &[f64], y_mean: f64, y_scale: f64) -> (f64, Vec<f64>) {
        let coefficients: Vec<f64> = weights
            .iter()
            .zip(self.scales.iter())
            .map(|(&w, &s)| w * y_scale / s)
            .collect();
        let intercept = coefficients
            .iter()
            .zip(self.means.iter())
            .fold(y_mean, |acc, (&c, &mu)| acc - c * mu);
        (intercept, coefficients)
    }
}

/// Copy a standardized design into nalgebra storage.
pub(crate) fn to_dmatrix(z: &Array2<f64>) -> DMatrix<f64> {
    let (rows, cols) = z.dim();
    DMatrix::from_fn(rows, cols, |i, j| z[[i, j]])
}

/// `σ_min / σ_max` of the standardized design, or [`Error::SingularSystem`]
/// when it is at or below `rank_tolerance`.
pub(crate) fn check_rank<'a>(
    singular_values: impl IntoIterator<Item = &'a f64>,
    rank_tolerance: f64,
) -> Result<f64> {
    let (sigma_min, sigma_max) = singular_values
        .into_iter()
        .fold((f64::INFINITY, 0.0f64), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    let ratio = sigma_min / sigma_max;

    tracing::debug!(sigma_min, sigma_max, condition_ratio = ratio, "standardized design spectrum");

    // Written as a negated comparison so a NaN ratio is also rejected.
    if !(ratio > rank_tolerance) {
        return Err(Error::SingularSystem {
            reason: format!(
                "design matrix is rank deficient (singular value ratio {ratio:e} \
                 <= tolerance {rank_tolerance:e}); check for constant, duplicate or \
                 linearly dependent columns"
            ),
        });
    }
    Ok(ratio)
}
