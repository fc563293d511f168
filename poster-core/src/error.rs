//! Error types for poster operations.
//!
//! Geometry and interaction are infallible (out-of-range values are clamped),
//! so the only errors left are at the document and parsing boundaries.

use thiserror::Error;

/// Result type for poster operations.
pub type PosterResult<T> = Result<T, PosterError>;

/// Errors that can occur in poster operations.
#[derive(Debug, Error)]
pub enum PosterError {
    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A named value (template, effect, aspect, ...) was not recognized.
    #[error("Unknown {kind}: {value}")]
    UnknownName {
        /// What was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl PosterError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownName {
            kind,
            value: value.to_string(),
        }
    }
}
