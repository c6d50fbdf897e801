//! Error types for fitting, inference and persistence.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are
//! reported at the point of the offending call and never retried: fitting is
//! a deterministic computation, so retrying with unchanged inputs cannot
//! succeed.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the regression engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Shapes of inputs and model disagree.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// What was being checked (e.g. "targets", "row 3").
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Training data does not determine a unique least-squares solution.
    #[error("singular system: {reason}")]
    SingularSystem { reason: String },

    /// A feature or target value is NaN or infinite.
    #[error(
        "non-finite value {value} at row {row}, {}",
        .column.map_or_else(|| "target".to_string(), |c| format!("column {c}"))
    )]
    InvalidInput {
        row: usize,
        /// Column index, `None` for a target value.
        column: Option<usize>,
        value: f64,
    },

    /// Gradient descent hit its iteration bound (or diverged) before converging.
    #[error("gradient descent did not converge after {iterations} iterations (gradient norm {gradient_norm:e})")]
    NotConverged { iterations: usize, gradient_norm: f64 },

    /// Caller's column names do not match the names stored with the model.
    #[error("feature names mismatch: model expects {expected:?}, got {actual:?}")]
    FeatureNameMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Invalid training configuration.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The artifact could not be decoded into a model.
    #[error("corrupt artifact: {0}")]
    CorruptArtifact(#[from] ArtifactError),

    /// Postcard encoding error while writing an artifact.
    #[error("encoding error: {0}")]
    Encoding(#[from] postcard::Error),

    /// JSON encoding error while writing an artifact.
    #[error("JSON encoding error: {0}")]
    Json(#[source] serde_json::Error),

    /// I/O error while reading or writing an artifact file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons an artifact is rejected on load.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Wrong magic bytes or format tag.
    #[error("not a co2-regression model artifact")]
    NotAnArtifact,

    /// Artifact was written by a newer, incompatible format version.
    #[error("artifact format version {major}.{minor} is not supported")]
    UnsupportedVersion { major: u8, minor: u8 },

    /// Payload checksum doesn't match the header.
    #[error("checksum mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    /// Data ends before the declared length.
    #[error("artifact truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Extra data after the declared payload.
    #[error("{0} trailing bytes after payload")]
    TrailingBytes(usize),

    /// Payload bytes do not decode.
    #[error("payload decoding error: {0}")]
    Decoding(#[from] postcard::Error),

    /// Declared feature count disagrees with the stored coefficients or names.
    #[error("{field} holds {actual} entries but the artifact declares {declared} features")]
    FeatureCountMismatch {
        field: &'static str,
        declared: usize,
        actual: usize,
    },

    /// A stored parameter is NaN or infinite.
    #[error("non-finite {0} in artifact")]
    NonFinite(&'static str),

    /// JSON artifact is malformed.
    #[error("invalid JSON artifact: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
