//! Taskade task-tracking connector.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{check_auth, post_json, CallOutcome};

const TASKADE_BASE_URL: &str = "https://api.taskade.com";

/// Client for the Taskade task-tracking API.
pub struct TaskadeConnector {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TaskadeConnector {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, TASKADE_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Probe the API with the stored credentials.
    pub async fn authenticate(&self) -> bool {
        check_auth(
            &self.client,
            &format!("{}/auth", self.base_url),
            &self.api_key,
        )
        .await
    }

    /// Create a tracking item. The request carries `title`, `description`
    /// and `status`; the response includes the created item's `id`.
    pub async fn create_task(&self, request: Value) -> CallOutcome {
        let url = format!("{}/tasks", self.base_url);
        post_json(
            &self.client,
            &url,
            &self.api_key,
            &request,
            StatusCode::CREATED,
        )
        .await
    }
}
