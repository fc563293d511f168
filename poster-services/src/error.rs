//! Error types for collaborator calls.

use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised by external providers.
///
/// These rarely escape the crate: [`crate::ContentService`] turns them into
/// "return the input unchanged" and [`crate::VerseLookup`] into
/// [`ServiceError::VerseNotFound`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A configured endpoint is not a valid URL.
    #[error("invalid service URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("provider HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// JSON parsing failed.
    #[error("failed to parse provider payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The provider answered with an error.
    #[error("provider error: {0}")]
    Provider(String),
    /// The provider answered with nothing usable.
    #[error("provider returned an empty response")]
    EmptyResponse,
    /// Image payload was not valid base64.
    #[error("invalid image payload: {0}")]
    InvalidImage(#[from] base64::DecodeError),
    /// No generator is configured for this kind of request.
    #[error("no {0} generator configured")]
    Unavailable(&'static str),
    /// The verse reference was not recognized in any version tried.
    #[error("Verse not found: \"{query}\"")]
    VerseNotFound {
        /// The reference the user asked for.
        query: String,
    },
}
