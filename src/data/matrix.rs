//! Row-major feature matrix.

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{Error, Result};

/// Dense `n × p` feature matrix, one row per observation.
///
/// Column order is a caller contract: it must match between training and
/// prediction.
///
/// # Example
///
/// ```
/// use co2_regression::data::FeatureMatrix;
///
/// let x = FeatureMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// assert_eq!(x.n_samples(), 2);
/// assert_eq!(x.n_features(), 2);
/// assert_eq!(x.row(1).to_vec(), vec![3.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: Array2<f64>,
}

impl FeatureMatrix {
    /// Wrap an existing `[n_samples, n_features]` array.
    pub fn new(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Build a matrix from rows.
    ///
    /// Fails with [`Error::DimensionMismatch`] if the rows have unequal
    /// lengths. An empty slice yields a `0 × 0` matrix.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let n_features = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut flat = Vec::with_capacity(rows.len() * n_features);

        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_features {
                return Err(Error::DimensionMismatch {
                    context: format!("row {i} length"),
                    expected: n_features,
                    actual: row.len(),
                });
            }
            flat.extend_from_slice(row);
        }

        Self::from_shape(flat, rows.len(), n_features)
    }

    /// Build a matrix from a flat row-major buffer.
    ///
    /// Fails with [`Error::DimensionMismatch`] if `flat.len()` is not
    /// `n_samples * n_features`, including when that product overflows.
    pub fn from_flat(flat: Vec<f64>, n_samples: usize, n_features: usize) -> Result<Self> {
        let expected = n_samples.checked_mul(n_features).ok_or_else(|| Error::DimensionMismatch {
            context: format!("flat buffer length ({n_samples} x {n_features} overflows)"),
            expected: usize::MAX,
            actual: flat.len(),
        })?;
        if flat.len() != expected {
            return Err(Error::DimensionMismatch {
                context: "flat buffer length".into(),
                expected,
                actual: flat.len(),
            });
        }
        Self::from_shape(flat, n_samples, n_features)
    }

    fn from_shape(flat: Vec<f64>, n_samples: usize, n_features: usize) -> Result<Self> {
        let actual = flat.len();
        let data = Array2::from_shape_vec((n_samples, n_features), flat).map_err(|_| {
            Error::DimensionMismatch {
                context: "flat buffer length".into(),
                expected: n_samples.saturating_mul(n_features),
                actual,
            }
        })?;
        Ok(Self { data })
    }

    /// Number of rows.
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    #[inline]
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    /// Borrow the underlying array.
    #[inline]
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Borrow a single row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_samples()`.
    #[inline]
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.data.row(index)
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = ArrayView1<'_, f64>> {
        self.data.axis_iter(Axis(0))
    }

    /// Consume into the underlying array.
    pub fn into_inner(self) -> Array2<f64> {
        self.data
    }

    /// Fail with [`Error::InvalidInput`] at the first NaN or infinite value.
    pub fn ensure_finite(&self) -> Result<()> {
        for ((row, column), &value) in self.data.indexed_iter() {
            if !value.is_finite() {
                return Err(Error::InvalidInput {
                    row,
                    column: Some(column),
                    value,
                });
            }
        }
        Ok(())
    }
}

impl From<Array2<f64>> for FeatureMatrix {
    fn from(data: Array2<f64>) -> Self {
        Self::new(data)
    }
}
