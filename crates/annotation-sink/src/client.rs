//! HTTP client for the annotations endpoint.

use crate::{Annotation, AnnotationSink, AnnotationSinkError, AnnotationSinkResult};
use async_trait::async_trait;
use tracing::{debug, error};

/// Annotations API client scoped to one host, project, and API key.
#[derive(Clone)]
pub struct AnnotationClient {
    http_client: reqwest::Client,
    host: String,
    project_id: String,
    api_key: String,
}

impl AnnotationClient {
    /// Create a new annotations client.
    ///
    /// # Arguments
    /// * `host` - Analytics platform host (e.g. `https://app.posthog.com`)
    /// * `project_id` - Project the annotations are created under
    /// * `api_key` - Personal API key used as the bearer token
    pub fn new(
        host: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            host: host.into(),
            project_id: project_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Build the project-scoped annotations URL.
    fn annotations_url(&self) -> String {
        format!(
            "{}/api/projects/{}/annotations/",
            self.host, self.project_id
        )
    }
}

#[async_trait]
impl AnnotationSink for AnnotationClient {
    async fn create_annotation(&self, annotation: &Annotation) -> AnnotationSinkResult<()> {
        let url = self.annotations_url();

        debug!(date_created = %annotation.date_created, "Creating annotation");

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(annotation)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Annotation create failed: {} - {}", status, body);
            return Err(AnnotationSinkError::Api {
                status,
                message: body,
            });
        }

        debug!(date_created = %annotation.date_created, "Annotation created");
        Ok(())
    }
}

impl std::fmt::Debug for AnnotationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationClient")
            .field("host", &self.host)
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotations_url_includes_project() {
        let client = AnnotationClient::new("https://app.posthog.com", "1234", "phx_key");
        assert_eq!(
            client.annotations_url(),
            "https://app.posthog.com/api/projects/1234/annotations/"
        );
    }

    #[test]
    fn debug_does_not_expose_api_key() {
        let client = AnnotationClient::new("https://app.posthog.com", "1234", "phx_secret");
        let debug = format!("{:?}", client);
        assert!(debug.contains("AnnotationClient"));
        assert!(!debug.contains("phx_secret"));
    }

    #[tokio::test]
    async fn create_against_unreachable_host_is_http_error() {
        let client = AnnotationClient::new("http://127.0.0.1:1", "1234", "key");
        let annotation = Annotation::organization("x", "2024-03-01T09:30:00+00:00");
        let result = client.create_annotation(&annotation).await;
        assert!(matches!(result, Err(AnnotationSinkError::Http(_))));
    }
}
