//! Model metadata.
//!
//! Shared metadata types for model introspection and persistence.

use serde::{Deserialize, Serialize};

use crate::training::FitSummary;

/// Metadata stored alongside the parameters.
///
/// Everything here is optional: a model built directly from parameters has
/// no names and no fit summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    /// Column names in training column order (optional).
    pub feature_names: Option<Vec<String>>,
    /// Diagnostics recorded at fit time (optional).
    pub summary: Option<FitSummary>,
}

impl ModelMeta {
    /// Metadata carrying only feature names.
    pub fn with_feature_names(names: Vec<String>) -> Self {
        Self {
            feature_names: Some(names),
            ..Default::default()
        }
    }
}
