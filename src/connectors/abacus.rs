//! Abacus AI prediction connector.

use reqwest::{Client, StatusCode};
use serde_json::Value;

use super::{check_auth, post_json, CallOutcome};

const ABACUS_BASE_URL: &str = "https://api.abacus.ai";

/// Client for the Abacus model-prediction API.
pub struct AbacusConnector {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AbacusConnector {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, ABACUS_BASE_URL)
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

    /// Ask a deployed model for a prediction over the given context.
    pub async fn get_model_prediction(&self, request: Value) -> CallOutcome {
        let url = format!("{}/predict", self.base_url);
        post_json(&self.client, &url, &self.api_key, &request, StatusCode::OK).await
    }
}
