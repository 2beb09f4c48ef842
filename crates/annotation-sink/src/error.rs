//! Error types for annotation delivery.

use thiserror::Error;

/// Error type for annotation sink operations.
#[derive(Debug, Error)]
pub enum AnnotationSinkError {
    /// Network or transport-level HTTP error from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The annotations endpoint returned a non-success HTTP status.
    ///
    /// Contains the status code and response body for debugging. Common
    /// causes: invalid API key, unknown project id.
    #[error("Annotations API error: {status} - {message}")]
    Api {
        /// The HTTP status code returned by the endpoint.
        status: u16,
        /// The response body, typically containing error details.
        message: String,
    },
}

/// Convenience Result type alias for annotation sink operations.
pub type AnnotationSinkResult<T> = Result<T, AnnotationSinkError>;
