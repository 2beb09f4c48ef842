//! Core error types for the annotator.

use thiserror::Error;

/// Core error type for configuration handling.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::Config("missing project id".to_string());
        assert_eq!(format!("{}", err), "Configuration error: missing project id");
    }

    #[test]
    fn invalid_url_from_parse_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: ConfigError = parse_err.into();
        assert!(format!("{}", err).starts_with("Invalid URL:"));
    }
}
