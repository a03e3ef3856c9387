//! Error types for AnyValue decoding and encoding.

use thiserror::Error;

/// Errors that can occur while classifying, decoding, or encoding an `AnyValue`.
#[derive(Error, Debug)]
pub enum AnyValueError {
    /// None of the six kinds matched the input. Carries the offending
    /// raw content (JSON text or a rendering of the YAML node).
    #[error("unrecognized value shape: {0}")]
    UnrecognizedShape(String),

    /// A kind tag supplied from outside the type system (numeric code or
    /// name) is not one of the six known kinds.
    #[error("invalid tag: {0}")]
    InvalidTag(String),

    /// The JSON codec rejected the input or failed to encode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML codec rejected the input or failed to encode.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias used throughout anyvalue-core.
pub type Result<T> = std::result::Result<T, AnyValueError>;
