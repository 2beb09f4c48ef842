//! Configuration management for the annotator.
//!
//! All configuration is environment-provided. Source and destination
//! credentials are optional at load time; the sync orchestrator checks
//! completeness before issuing any API call.

use crate::ConfigResult;
use serde::{Deserialize, Serialize};
use url::Url;

/// Default Marketing API base URL (overridable for tests and proxies).
pub const DEFAULT_FB_API_BASE_URL: &str = "https://graph.facebook.com";

/// Default Marketing API version segment.
pub const DEFAULT_FB_API_VERSION: &str = "v19.0";

/// Default PostHog host.
pub const DEFAULT_POSTHOG_HOST: &str = "https://app.posthog.com";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Main annotator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Marketing API access token for the ad account.
    pub fb_access_token: Option<String>,
    /// Ad account id the activity log is read from (e.g. `act_12345`).
    pub fb_ad_account_id: Option<String>,
    /// Marketing API version segment.
    pub fb_api_version: String,
    /// Marketing API base URL.
    pub fb_api_base_url: String,
    /// PostHog personal API key used as the bearer token.
    pub posthog_api_key: Option<String>,
    /// PostHog project id annotations are created under.
    pub posthog_project_id: Option<String>,
    /// PostHog host.
    pub posthog_host: String,
    /// When true, the event-type allowlist is bypassed and every event on an
    /// allowed object type is annotated.
    pub annotate_all_event_types: bool,
    /// Path of the JSON file backing the durable sync state.
    pub state_file: Option<std::path::PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            fb_access_token: None,
            fb_ad_account_id: None,
            fb_api_version: DEFAULT_FB_API_VERSION.to_string(),
            fb_api_base_url: DEFAULT_FB_API_BASE_URL.to_string(),
            posthog_api_key: None,
            posthog_project_id: None,
            posthog_host: DEFAULT_POSTHOG_HOST.to_string(),
            annotate_all_event_types: false,
            state_file: None,
        }
    }
}

/// Complete source-API credential set required to issue an activities query.
#[derive(Debug, Clone)]
pub struct SourceCredentials {
    /// Marketing API access token.
    pub access_token: String,
    /// Ad account id.
    pub ad_account_id: String,
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        if let Some(level) = non_empty_env("ANNOTATOR_LOG_LEVEL") {
            self.log_level = level;
        }
        self.fb_access_token = non_empty_env("FB_ACCESS_TOKEN").or(self.fb_access_token.take());
        self.fb_ad_account_id =
            non_empty_env("FB_AD_ACCOUNT_ID").or(self.fb_ad_account_id.take());
        if let Some(version) = non_empty_env("FB_API_VERSION") {
            self.fb_api_version = version;
        }
        if let Some(base) = non_empty_env("FB_API_BASE_URL") {
            self.fb_api_base_url = base;
        }
        self.posthog_api_key = non_empty_env("POSTHOG_API_KEY").or(self.posthog_api_key.take());
        self.posthog_project_id =
            non_empty_env("POSTHOG_PROJECT_ID").or(self.posthog_project_id.take());
        if let Some(host) = non_empty_env("POSTHOG_HOST") {
            self.posthog_host = host;
        }
        if let Some(flag) = non_empty_env("ANNOTATE_ALL_EVENT_TYPES") {
            self.annotate_all_event_types = parse_bool_flag(&flag);
        }
        if let Some(path) = non_empty_env("ANNOTATOR_STATE_FILE") {
            self.state_file = Some(std::path::PathBuf::from(path));
        }
    }

    /// Returns the complete source credential pair, or None if either half is
    /// missing. The orchestrator treats None as "abort this run, logged".
    pub fn source_credentials(&self) -> Option<SourceCredentials> {
        match (&self.fb_access_token, &self.fb_ad_account_id) {
            (Some(token), Some(account)) => Some(SourceCredentials {
                access_token: token.clone(),
                ad_account_id: account.clone(),
            }),
            _ => None,
        }
    }

    /// Get the PostHog host as a parsed URL.
    pub fn posthog_host_url(&self) -> ConfigResult<Url> {
        Url::parse(&self.posthog_host).map_err(Into::into)
    }
}

/// Interpret a boolean-like environment flag.
///
/// Accepts `true`, `1`, and `yes` (case-insensitive); everything else is false.
fn parse_bool_flag(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

fn non_empty_env(name: &str) -> Option<String> {
    let raw = std::env::var(name).ok()?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
