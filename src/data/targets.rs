//! Target vector.

use ndarray::{Array1, ArrayView1};

use crate::error::{Error, Result};

/// One real target per observation, aligned by index with feature rows.
///
/// Also the output type of batch prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetVector {
    data: Array1<f64>,
}

impl TargetVector {
    /// Wrap an existing array.
    pub fn new(data: Array1<f64>) -> Self {
        Self { data }
    }

    /// Number of targets.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when there are no targets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the underlying array.
    #[inline]
    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    /// Copy the values into a `Vec`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.to_vec()
    }

    /// Consume into the underlying array.
    pub fn into_inner(self) -> Array1<f64> {
        self.data
    }

    /// Fail with [`Error::InvalidInput`] at the first NaN or infinite value.
    pub fn ensure_finite(&self) -> Result<()> {
        match self.data.iter().position(|v| !v.is_finite()) {
            Some(row) => Err(Error::InvalidInput {
                row,
                column: None,
                value: self.data[row],
            }),
            None => Ok(()),
        }
    }
}

impl From<Vec<f64>> for TargetVector {
    fn from(values: Vec<f64>) -> Self {
        Self::new(Array1::from(values))
    }
}

impl From<&[f64]> for TargetVector {
    fn from(values: &[f64]) -> Self {
        Self::new(Array1::from(values.to_vec()))
    }
}

impl From<Array1<f64>> for TargetVector {
    fn from(data: Array1<f64>) -> Self {
        Self::new(data)
    }
}
