//! CrewAI orchestration connector.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{check_auth, post_json, CallOutcome};

const CREWAI_BASE_URL: &str = "https://api.crewai.com";

/// Client for the CrewAI agent-orchestration API.
pub struct CrewAiConnector {
    client: Client,
    api_key: String,
    base_url: String,
}

impl CrewAiConnector {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, CREWAI_BASE_URL)
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

    /// Create a task-scoped agent. The request carries `task`, `role` and
    /// `goal`; the response includes the created agent's `id`.
    pub async fn create_agent(&self, request: Value) -> CallOutcome {
        let url = format!("{}/agents", self.base_url);
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
