//! Full-batch gradient descent for least squares.
//!
//! Features are z-scored and the target is centered and scaled before
//! descending, which makes the step size and the gradient tolerance
//! independent of the units of the inputs. The standardized problem has no
//! intercept (everything is centered); coefficients are mapped back to the
//! original scale at the end:
//!
//! ```text
//! coef[j]   = w[j] · σ_y / σ_j
//! intercept = ȳ − Σ coef[j] · μ_j
//! ```
//!
//! Iteration starts from zero and involves no randomness, so identical inputs
//! and configuration always produce identical outputs.

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::{Error, Result};

use super::scaling::{check_rank, to_dmatrix, Standardization};

/// Result of a converged descent.
#[derive(Debug, Clone)]
pub(crate) struct DescentSolution {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    /// Steps taken before the gradient norm dropped below tolerance.
    pub iterations: usize,
    /// `σ_min / σ_max` of the standardized design matrix.
    pub condition_ratio: f64,
}

/// Run gradient descent on `(1 / 2n) ‖Zw − ỹ‖²`.
pub(crate) fn solve_gradient_descent(
    features: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, f64>,
    learning_rate: f64,
    max_iterations: usize,
    tolerance: f64,
    rank_tolerance: f64,
) -> Result<DescentSolution> {
    let (n_samples, n_features) = features.dim();
    if n_samples < n_features + 1 {
        return Err(Error::SingularSystem {
            reason: format!(
                "{n_samples} samples cannot determine {} parameters",
                n_features + 1
            ),
        });
    }

    let standardization = Standardization::fit(features)?;
    let z = standardization.transform(features);
    // Descent would otherwise settle on one of infinitely many minimizers.
    let condition_ratio = check_rank(to_dmatrix(&z).singular_values().iter(), rank_tolerance)?;

    let n = n_samples as f64;
    let y_mean = targets.sum() / n;
    let y_sd = (targets.iter().map(|&v| (v - y_mean) * (v - y_mean)).sum::<f64>() / n).sqrt();
    // A constant target is fitted exactly by the intercept alone.
    let y_scale = if y_sd > 0.0 { y_sd } else { 1.0 };
    let y = targets.mapv(|v| (v - y_mean) / y_scale);

    let mut weights = Array1::<f64>::zeros(n_features);
    let mut gradient_norm = f64::INFINITY;

    for iteration in 0..max_iterations {
        let residuals = z.dot(&weights) - &y;
        let gradient = z.t().dot(&residuals) / n;
        gradient_norm = gradient.dot(&gradient).sqrt();

        if !gradient_norm.is_finite() {
            tracing::warn!(iteration, "gradient descent diverged");
            return Err(Error::NotConverged {
                iterations: iteration,
                gradient_norm,
            });
        }

        if gradient_norm < tolerance {
            tracing::debug!(iteration, gradient_norm, "gradient descent converged");
            let (intercept, coefficients) =
                standardization.unscale(&weights.to_vec(), y_mean, y_scale);
            return Ok(DescentSolution {
                intercept,
                coefficients,
                iterations: iteration,
                condition_ratio,
            });
        }

        weights.scaled_add(-learning_rate, &gradient);

        if iteration % 10_000 == 0 {
            tracing::trace!(iteration, gradient_norm, "gradient descent progress");
        }
    }

    Err(Error::NotConverged {
        iterations: max_iterations,
        gradient_norm,
    })
}
