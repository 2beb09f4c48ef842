//! Error types for activity log fetches.

use thiserror::Error;

/// Error type for all activity client operations.
///
/// Uses thiserror for automatic Display and Error trait implementations.
/// Supports automatic conversion from reqwest and serde_json errors via #[from].
#[derive(Debug, Error)]
pub enum ActivityClientError {
    /// Network or transport-level HTTP error from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Marketing API returned a non-success HTTP status.
    ///
    /// Contains the status code and response body for debugging. Common
    /// causes: expired access token, unknown ad account, permission errors.
    #[error("Marketing API error: {status} - {message}")]
    Api {
        /// The HTTP status code returned by the API.
        status: u16,
        /// The response body, typically containing error details.
        message: String,
    },

    /// JSON deserialization of the response body failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for activity client operations.
pub type ActivityClientResult<T> = Result<T, ActivityClientError>;
