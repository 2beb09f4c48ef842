//! HTTP client for the activities edge.

use crate::{ActivityClientError, ActivityClientResult, AdActivity, SyncWindow};
use serde::Deserialize;
use tracing::{debug, error};

/// Fixed field projection requested from the activities edge.
pub const ACTIVITY_FIELDS: &str =
    "event_time,event_type,object_type,object_id,object_name,actor_name,extra_data";

/// Page size for the single activities fetch per run.
pub const ACTIVITY_PAGE_SIZE: u32 = 100;

/// Response envelope of the activities edge.
#[derive(Debug, Deserialize)]
struct ActivitiesResponse {
    #[serde(default)]
    data: Vec<AdActivity>,
}

/// Marketing API client scoped to one base URL and API version.
#[derive(Clone)]
pub struct ActivityClient {
    http_client: reqwest::Client,
    base_url: String,
    api_version: String,
}

impl ActivityClient {
    /// Create a new activity client.
    ///
    /// # Arguments
    /// * `base_url` - API base URL (e.g. `https://graph.facebook.com`)
    /// * `api_version` - Version path segment (e.g. `v19.0`)
    pub fn new(base_url: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_version: api_version.into(),
        }
    }

    /// Build the activities edge URL for an ad account.
    fn activities_url(&self, ad_account_id: &str) -> String {
        format!(
            "{}/{}/{}/activities",
            self.base_url, self.api_version, ad_account_id
        )
    }

    /// Fetch one page of activity log entries, newest first.
    ///
    /// Issues a single request with the fixed field projection and page size.
    /// When `window` is present the server filters by `since`/`until`;
    /// otherwise the service's default recent-activity window applies and
    /// admission falls back to per-event watermark comparison.
    pub async fn fetch_activities(
        &self,
        ad_account_id: &str,
        access_token: &str,
        window: Option<SyncWindow>,
    ) -> ActivityClientResult<Vec<AdActivity>> {
        let url = self.activities_url(ad_account_id);

        let mut query: Vec<(&str, String)> = vec![
            ("fields", ACTIVITY_FIELDS.to_string()),
            ("limit", ACTIVITY_PAGE_SIZE.to_string()),
            ("access_token", access_token.to_string()),
        ];
        if let Some(window) = window {
            query.push(("since", window.since.to_string()));
            query.push(("until", window.until.to_string()));
        }

        debug!(ad_account_id, windowed = window.is_some(), "Fetching activity log");

        let response = self.http_client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Activity fetch failed: {} - {}", status, body);
            return Err(ActivityClientError::Api {
                status,
                message: body,
            });
        }

        let parsed: ActivitiesResponse = response.json().await?;
        debug!(count = parsed.data.len(), "Activity log fetched");
        Ok(parsed.data)
    }
}

impl std::fmt::Debug for ActivityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}
