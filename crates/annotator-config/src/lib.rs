//! Configuration, logging, and core error types for the ads activity annotator.

mod config;
mod error;
mod logging;

pub use config::{
    Config, SourceCredentials, DEFAULT_FB_API_BASE_URL, DEFAULT_FB_API_VERSION,
    DEFAULT_LOG_LEVEL, DEFAULT_POSTHOG_HOST,
};
pub use error::{ConfigError, ConfigResult};
pub use logging::init_logging;
