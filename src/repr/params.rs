//! Fitted linear parameters and prediction.

use ndarray::{Array1, ArrayView1};
use rayon::prelude::*;

use crate::data::{FeatureMatrix, TargetVector};
use crate::error::{Error, Result};

/// Coefficients plus intercept of a fitted affine model.
///
/// Immutable once built: there are no mutating accessors, so a value can be
/// shared across threads and reused for any number of predictions. Refitting
/// produces a new value.
///
/// # Example
///
/// ```
/// use co2_regression::repr::ModelParameters;
///
/// // y = 0.5 * x0 + 0.3 * x1 + 0.1
/// let params = ModelParameters::new(vec![0.5, 0.3], 0.1);
///
/// assert_eq!(params.n_features(), 2);
/// let y = params.predict_row(&[2.0, 3.0]).unwrap();
/// assert!((y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    /// One weight per feature, in training column order.
    coefficients: Box<[f64]>,
    intercept: f64,
}

impl ModelParameters {
    /// Create parameters from coefficients (training column order) and intercept.
    pub fn new(coefficients: impl Into<Box<[f64]>>, intercept: f64) -> Self {
        Self {
            coefficients: coefficients.into(),
            intercept,
        }
    }

    /// Number of input features `p`.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Coefficients in training column order.
    #[inline]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Coefficient for one feature.
    ///
    /// # Panics
    ///
    /// Panics if `feature >= n_features()`.
    #[inline]
    pub fn coefficient(&self, feature: usize) -> f64 {
        self.coefficients[feature]
    }

    /// Constant offset.
    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// True when the intercept and every coefficient are finite.
    pub fn is_finite(&self) -> bool {
        self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite())
    }

    /// Predict a single row.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `features.len() != n_features()`
    /// and [`Error::InvalidInput`] on a non-finite feature value (reported as row 0).
    pub fn predict_row(&self, features: &[f64]) -> Result<f64> {
        self.check_row(0, ArrayView1::from(features))?;
        Ok(self.evaluate(ArrayView1::from(features)))
    }

    /// Predict every row of a matrix.
    ///
    /// The whole call fails if any row is invalid; no partial output is returned.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<TargetVector> {
        self.check_matrix(features)?;
        let output: Array1<f64> = features.rows().map(|row| self.evaluate(row)).collect();
        Ok(TargetVector::new(output))
    }

    /// Parallel prediction over rows.
    ///
    /// Uses Rayon to parallelize over rows. Each row is evaluated with the
    /// same kernel as [`predict`](Self::predict), so results are identical.
    pub fn par_predict(&self, features: &FeatureMatrix) -> Result<TargetVector> {
        self.check_matrix(features)?;
        let view = features.view();
        let output: Vec<f64> = (0..features.n_samples())
            .into_par_iter()
            .map(|row_idx| self.evaluate(view.row(row_idx)))
            .collect();
        Ok(TargetVector::from(output))
    }

    /// `intercept + Σ coefficient[i] × row[i]`, summed in column order.
    #[inline]
    fn evaluate(&self, row: ArrayView1<'_, f64>) -> f64 {
        row.iter()
            .zip(self.coefficients.iter())
            .fold(self.intercept, |acc, (&x, &w)| acc + w * x)
    }

    fn check_matrix(&self, features: &FeatureMatrix) -> Result<()> {
        if features.n_features() != self.n_features() {
            return Err(Error::DimensionMismatch {
                context: "feature columns".into(),
                expected: self.n_features(),
                actual: features.n_features(),
            });
        }
        features.ensure_finite()
    }

    fn check_row(&self, row_idx: usize, row: ArrayView1<'_, f64>) -> Result<()> {
        if row.len() != self.n_features() {
            return Err(Error::DimensionMismatch {
                context: format!("row {row_idx} length"),
                expected: self.n_features(),
                actual: row.len(),
            });
        }
        match row.iter().position(|v| !v.is_finite()) {
            Some(column) => Err(Error::InvalidInput {
                row: row_idx,
                column: Some(column),
                value: row[column],
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn make_simple_params() -> ModelParameters {
        // y = 0.5*x0 + 0.3*x1 + 0.1
        ModelParameters::new(vec![0.5, 0.3], 0.1)
    }

    #[test]
    fn accessors() {
        let params = make_simple_params();

        assert_eq!(params.n_features(), 2);
        assert_eq!(params.coefficients(), &[0.5, 0.3]);
        assert_eq!(params.coefficient(1), 0.3);
        assert_eq!(params.intercept(), 0.1);
        assert!(params.is_finite());
    }

    #[test]
    fn predict_row_regression() {
        let params = make_simple_params();

        // 0.5*2 + 0.3*3 + 0.1 = 2.0
        let y = params.predict_row(&[2.0, 3.0]).unwrap();
        assert!((y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn predict_row_wrong_length() {
        let params = make_simple_params();

        let err = params.predict_row(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch { expected: 2, actual: 3, .. }
        ));
    }

    #[test]
    fn predict_row_non_finite() {
        let params = make_simple_params();

        let err = params.predict_row(&[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { column: Some(1), .. }));
    }

    #[test]
    fn predict_batch() {
        let params = make_simple_params();
        let x = FeatureMatrix::new(array![
            [2.0, 3.0], // 2.0
            [1.0, 1.0], // 0.9
            [0.0, 0.0], // 0.1
        ]);

        let y = params.predict(&x).unwrap();

        assert_eq!(y.len(), 3);
        assert!((y.view()[0] - 2.0).abs() < 1e-12);
        assert!((y.view()[1] - 0.9).abs() < 1e-12);
        assert!((y.view()[2] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn predict_batch_fails_whole_call_on_bad_row() {
        let params = make_simple_params();
        let x = FeatureMatrix::new(array![[2.0, 3.0], [f64::INFINITY, 1.0]]);

        assert!(matches!(
            params.predict(&x),
            Err(Error::InvalidInput { row: 1, column: Some(0), .. })
        ));
    }

    #[test]
    fn predict_batch_wrong_width() {
        let params = make_simple_params();
        let x = FeatureMatrix::new(array![[1.0, 2.0, 3.0]]);

        assert!(matches!(
            params.predict(&x),
            Err(Error::DimensionMismatch { expected: 2, actual: 3, .. })
        ));
    }

    #[test]
    fn par_predict_matches_sequential() {
        let params = ModelParameters::new(vec![1.5, -2.25, 0.125], 7.0);
        let rows: Vec<Vec<f64>> = (0..257)
            .map(|i| {
                let t = i as f64;
                vec![t.sin(), t * 0.01, (t * 0.7).cos()]
            })
            .collect();
        let x = FeatureMatrix::from_rows(&rows).unwrap();

        let seq = params.predict(&x).unwrap();
        let par = params.par_predict(&x).unwrap();

        assert_eq!(seq, par);
    }

    #[test]
    fn predict_is_repeatable() {
        let params = make_simple_params();
        let a = params.predict_row(&[4.0, -1.0]).unwrap();
        let _ = params.predict_row(&[100.0, 200.0]).unwrap();
        let b = params.predict_row(&[4.0, -1.0]).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn predict_empty_matrix() {
        let params = make_simple_params();
        let x = FeatureMatrix::new(ndarray::Array2::zeros((0, 2)));
        assert!(params.predict(&x).unwrap().is_empty());
    }
}
