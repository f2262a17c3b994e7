//! Error types for the flow-fields core.

use thiserror::Error;

/// Errors produced by construction and I/O paths.
///
/// Simulation values never produce errors: out-of-range config is clamped
/// and out-of-range particle access is a panic.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Width or height was zero when creating a store, viewport or frame buffer.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A control edit named a key that is not a config field.
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    /// Reading or writing persisted settings or an exported image failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Persisted settings could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FlowError {
    fn from(e: serde_json::Error) -> Self {
        FlowError::Serialization(e.to_string())
    }
}
