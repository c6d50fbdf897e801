//! Conversion between runtime types and persisted artifacts.
//!
//! # High-Level API
//!
//! ```
//! use co2_regression::model::RegressionModel;
//! use co2_regression::repr::ModelParameters;
//!
//! let model = RegressionModel::from_params(ModelParameters::new(vec![2.0], 1.0));
//!
//! let bytes = model.to_bytes().unwrap();
//! assert_eq!(RegressionModel::from_bytes(&bytes).unwrap(), model);
//!
//! let json = model.to_json().unwrap();
//! assert_eq!(RegressionModel::from_json(&json).unwrap(), model);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, Error, Result};
use crate::io::native::{
    check_version, FormatFlags, FormatHeader, NativeCodec, CURRENT_VERSION_MAJOR,
};
use crate::model::{ModelMeta, RegressionModel};
use crate::repr::ModelParameters;

/// Format tag of the JSON envelope.
pub const JSON_FORMAT: &str = "co2-regression";

// ============================================================================
// Payload Types
// ============================================================================

/// Serialized model body, shared by the binary and JSON formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub intercept: f64,
    /// Training column order.
    pub coefficients: Vec<f64>,
    pub meta: ModelMeta,
}

/// JSON envelope: `{"format": "co2-regression", "version": 1, "model": {...}}`.
#[derive(Debug, Serialize, Deserialize)]
struct JsonArtifact {
    format: String,
    version: u32,
    model: Payload,
}

impl Payload {
    /// Create a payload from a model.
    pub fn from_model(model: &RegressionModel) -> Self {
        let params = model.params();
        Self {
            intercept: params.intercept(),
            coefficients: params.coefficients().to_vec(),
            meta: model.meta().clone(),
        }
    }

    /// Header flags describing this payload.
    pub fn flags(&self) -> FormatFlags {
        let mut flags = FormatFlags::empty();
        if self.meta.feature_names.is_some() {
            flags.set(FormatFlags::HAS_FEATURE_NAMES);
        }
        if self.meta.summary.is_some() {
            flags.set(FormatFlags::HAS_SUMMARY);
        }
        flags
    }

    /// Validate and convert into a model.
    ///
    /// `declared` is the feature count recorded outside the payload (the
    /// binary header); the JSON format has none.
    pub fn into_model(self, declared: Option<usize>) -> Result<RegressionModel> {
        let n_features = self.coefficients.len();
        if let Some(declared) = declared {
            if declared != n_features {
                return Err(ArtifactError::FeatureCountMismatch {
                    field: "coefficients",
                    declared,
                    actual: n_features,
                }
                .into());
            }
        }
        if let Some(names) = &self.meta.feature_names {
            if names.len() != n_features {
                return Err(ArtifactError::FeatureCountMismatch {
                    field: "feature_names",
                    declared: n_features,
                    actual: names.len(),
                }
                .into());
            }
        }
        if !self.intercept.is_finite() {
            return Err(ArtifactError::NonFinite("intercept").into());
        }
        if self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::NonFinite("coefficient").into());
        }

        let params = ModelParameters::new(self.coefficients, self.intercept);
        RegressionModel::from_parts(params, self.meta)
    }
}

// ============================================================================
// RegressionModel Serialization API
// ============================================================================

impl RegressionModel {
    /// Save the model to a file in native binary format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), n_features = self.n_features(), "saved model");
        Ok(())
    }

    /// Load a model from a file in native binary format.
    ///
    /// A missing or unreadable file is [`Error::Io`]; a file that reads but
    /// does not decode is [`Error::CorruptArtifact`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let model = Self::from_bytes(&bytes)?;
        tracing::debug!(path = %path.display(), n_features = model.n_features(), "loaded model");
        Ok(model)
    }

    /// Serialize the model to bytes (header + payload).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let payload = Payload::from_model(self);
        let num_features = u32::try_from(payload.coefficients.len()).map_err(|_| {
            Error::InvalidConfig("model has more than u32::MAX features".into())
        })?;
        NativeCodec::new().serialize(num_features, payload.flags(), &payload)
    }

    /// Deserialize a model from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (header, payload): (FormatHeader, Payload) = NativeCodec::new().deserialize(bytes)?;
        payload.into_model(Some(header.num_features as usize))
    }

    /// Serialize the model to a JSON document.
    pub fn to_json(&self) -> Result<String> {
        let artifact = JsonArtifact {
            format: JSON_FORMAT.to_string(),
            version: u32::from(CURRENT_VERSION_MAJOR),
            model: Payload::from_model(self),
        };
        serde_json::to_string_pretty(&artifact).map_err(Error::Json)
    }

    /// Deserialize a model from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: JsonArtifact =
            serde_json::from_str(json).map_err(ArtifactError::InvalidJson)?;
        if artifact.format != JSON_FORMAT {
            return Err(ArtifactError::NotAnArtifact.into());
        }
        check_version(u8::try_from(artifact.version).unwrap_or(u8::MAX), 0)?;
        artifact.model.into_model(None)
    }
}

// ============================================================================
// ModelParameters Serialization API
// ============================================================================

impl ModelParameters {
    /// Save the parameters to a file in native binary format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        RegressionModel::from_params(self.clone()).save(path)
    }

    /// Load parameters from a file, discarding any stored metadata.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        RegressionModel::load(path).map(|m| m.into_parts().0)
    }

    /// Serialize the parameters to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        RegressionModel::from_params(self.clone()).to_bytes()
    }

    /// Deserialize parameters from bytes, discarding any stored metadata.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        RegressionModel::from_bytes(bytes).map(|m| m.into_parts().0)
    }
}

/// Read only the header of a binary artifact.
///
/// Does not verify the checksum or decode the payload.
pub fn inspect(bytes: &[u8]) -> Result<FormatHeader> {
    Ok(FormatHeader::parse(bytes)?)
}
