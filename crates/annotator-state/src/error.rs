//! Error types for state store backends.

use thiserror::Error;

/// Error type for durable state operations.
#[derive(Error, Debug)]
pub enum StateError {
    /// IO error reading or writing the backing file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Lock poisoned by a panicking writer
    #[error("State store lock poisoned")]
    Poisoned,
}

/// Result type alias using StateError.
pub type StateResult<T> = Result<T, StateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StateError = io.into();
        assert!(format!("{}", err).starts_with("IO error:"));
    }

    #[test]
    fn poisoned_display() {
        assert_eq!(format!("{}", StateError::Poisoned), "State store lock poisoned");
    }
}
