//! Closed-form least squares via SVD.
//!
//! The intercept is eliminated by centering: with `Z` the z-scored features
//! and `ỹ = y − ȳ` we solve
//!
//! ```text
//! minimize ‖Zw − ỹ‖²
//! ```
//!
//! and recover `coef[j] = w[j] / σ_j`, `intercept = ȳ − Σ coef[j] · μ_j`.
//! This is the same minimizer as the intercept-augmented problem `[1 | X]`,
//! but the singular values of `Z` do not move when a column is rescaled or
//! shifted. Decomposing `Z` directly also avoids forming `ZᵗZ`, whose
//! condition number is the square of that of `Z`.

use nalgebra::DVector;
use ndarray::{ArrayView1, ArrayView2};

use crate::error::{Error, Result};

use super::scaling::{check_rank, to_dmatrix, Standardization};

/// Solution of the least-squares problem in raw feature units.
#[derive(Debug, Clone)]
pub(crate) struct LeastSquaresSolution {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    /// `σ_min / σ_max` of the standardized design matrix.
    pub condition_ratio: f64,
}

/// Solve for the intercept and coefficients.
///
/// Fails with [`Error::SingularSystem`] when there are fewer samples than
/// unknowns, a column is constant, or `σ_min / σ_max ≤ rank_tolerance`.
pub(crate) fn solve_svd(
    features: ArrayView2<'_, f64>,
    targets: ArrayView1<'_, f64>,
    rank_tolerance: f64,
) -> Result<LeastSquaresSolution> {
    let (n_samples, n_features) = features.dim();
    let n_unknowns = n_features + 1;

    if n_samples < n_unknowns {
        return Err(Error::SingularSystem {
            reason: format!(
                "{n_samples} samples cannot determine {n_unknowns} parameters \
                 ({n_features} coefficients + intercept)"
            ),
        });
    }

    let standardization = Standardization::fit(features)?;
    let design = to_dmatrix(&standardization.transform(features));
    let y_mean = targets.sum() / n_samples as f64;
    let rhs = DVector::from_iterator(n_samples, targets.iter().map(|&v| v - y_mean));

    let svd = design
        .try_svd(true, true, f64::EPSILON, 0)
        .ok_or_else(|| Error::SingularSystem {
            reason: "singular value decomposition did not converge".into(),
        })?;

    let condition_ratio = check_rank(svd.singular_values.iter(), rank_tolerance)?;
    let sigma_max = svd.singular_values.max();

    let weights = svd
        .solve(&rhs, sigma_max * rank_tolerance)
        .map_err(|reason| Error::SingularSystem {
            reason: reason.to_string(),
        })?;

    let (intercept, coefficients) = standardization.unscale(weights.as_slice(), y_mean, 1.0);
    if !intercept.is_finite() || coefficients.iter().any(|b| !b.is_finite()) {
        return Err(Error::SingularSystem {
            reason: "least-squares solution is not finite".into(),
        });
    }

    Ok(LeastSquaresSolution {
        intercept,
        coefficients,
        condition_ratio,
    })
}
