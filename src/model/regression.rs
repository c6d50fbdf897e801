//! High-level regression model.
//!
//! Wraps [`ModelParameters`] with [`ModelMeta`] and combines training,
//! prediction and persistence into one interface. Serialization lives in
//! [`crate::io`].

use crate::data::{FeatureMatrix, TargetVector};
use crate::error::{Error, Result};
use crate::model::meta::ModelMeta;
use crate::repr::ModelParameters;
use crate::training::{FitSummary, LinearTrainer, RegressionConfig};

/// Fitted regression model with metadata.
///
/// # Example
///
/// ```
/// use co2_regression::data::{FeatureMatrix, TargetVector};
/// use co2_regression::model::RegressionModel;
/// use co2_regression::training::RegressionConfig;
///
/// let x = FeatureMatrix::from_rows(&[[0.0], [1.0], [2.0], [3.0]]).unwrap();
/// let y = TargetVector::from(vec![1.0, 3.0, 5.0, 7.0]);
///
/// let model = RegressionModel::train(&x, &y, RegressionConfig::default()).unwrap();
/// let bytes = model.to_bytes().unwrap();
/// let loaded = RegressionModel::from_bytes(&bytes).unwrap();
///
/// assert_eq!(loaded.params(), model.params());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionModel {
    params: ModelParameters,
    meta: ModelMeta,
}

impl RegressionModel {
    /// Train a new model.
    pub fn train(
        features: &FeatureMatrix,
        targets: &TargetVector,
        config: RegressionConfig,
    ) -> Result<Self> {
        let (params, summary) = LinearTrainer::new(config).fit_with_summary(features, targets)?;
        Ok(Self {
            params,
            meta: ModelMeta {
                feature_names: None,
                summary: Some(summary),
            },
        })
    }

    /// Create a model from parameters and metadata.
    ///
    /// Fails with [`Error::DimensionMismatch`] if feature names are present
    /// and their count differs from the number of coefficients.
    pub fn from_parts(params: ModelParameters, meta: ModelMeta) -> Result<Self> {
        if let Some(names) = &meta.feature_names {
            check_name_count(names.len(), params.n_features())?;
        }
        Ok(Self { params, meta })
    }

    /// Wrap bare parameters with empty metadata.
    pub fn from_params(params: ModelParameters) -> Self {
        Self {
            params,
            meta: ModelMeta::default(),
        }
    }

    /// Attach column names (training column order).
    pub fn with_feature_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        check_name_count(names.len(), self.params.n_features())?;
        self.meta.feature_names = Some(names);
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Underlying parameters.
    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Model metadata.
    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Number of input features.
    pub fn n_features(&self) -> usize {
        self.params.n_features()
    }

    /// Column names, if recorded.
    pub fn feature_names(&self) -> Option<&[String]> {
        self.meta.feature_names.as_deref()
    }

    /// Training diagnostics, if recorded.
    pub fn summary(&self) -> Option<&FitSummary> {
        self.meta.summary.as_ref()
    }

    /// Split into parameters and metadata.
    pub fn into_parts(self) -> (ModelParameters, ModelMeta) {
        (self.params, self.meta)
    }

    // =========================================================================
    // Prediction
    // =========================================================================

    /// Predict a single row.
    pub fn predict_row(&self, features: &[f64]) -> Result<f64> {
        self.params.predict_row(features)
    }

    /// Predict every row.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<TargetVector> {
        self.params.predict(features)
    }

    /// Predict every row in parallel.
    pub fn par_predict(&self, features: &FeatureMatrix) -> Result<TargetVector> {
        self.params.par_predict(features)
    }

    /// Predict after checking the caller's column names against the stored ones.
    ///
    /// Guards against the silent misprediction a reordered or renamed column
    /// would otherwise cause.
    pub fn predict_named<S: AsRef<str>>(
        &self,
        names: &[S],
        features: &FeatureMatrix,
    ) -> Result<TargetVector> {
        self.check_feature_names(names)?;
        self.params.predict(features)
    }

    /// Check column names against the stored feature names.
    ///
    /// Without stored names only the count is checked.
    pub fn check_feature_names<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        match &self.meta.feature_names {
            Some(expected) => {
                let matches = expected.len() == names.len()
                    && expected.iter().zip(names).all(|(e, n)| e == n.as_ref());
                if matches {
                    Ok(())
                } else {
                    Err(Error::FeatureNameMismatch {
                        expected: expected.clone(),
                        actual: names.iter().map(|n| n.as_ref().to_string()).collect(),
                    })
                }
            }
            None => check_name_count(names.len(), self.n_features()),
        }
    }
}

fn check_name_count(n_names: usize, n_features: usize) -> Result<()> {
    if n_names != n_features {
        return Err(Error::DimensionMismatch {
            context: "feature names".into(),
            expected: n_features,
            actual: n_names,
        });
    }
    Ok(())
}
