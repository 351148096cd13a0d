//! External service connectors.
//!
//! Each connector wraps one third-party API behind a uniform call contract:
//! an async method taking a structured request and returning a
//! [`CallOutcome`]. Connector faults never propagate; they become values the
//! calling agent can degrade on.

mod abacus;
mod crewai;
mod taskade;

pub use abacus::AbacusConnector;
pub use crewai::CrewAiConnector;
pub use taskade::TaskadeConnector;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one optional connector call.
///
/// Distinguishes a connector that was never configured from one whose call
/// failed. Both degrade to an omitted result field, but they are logged
/// differently so a misconfigured deployment is visible.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    Ok(Value),
    Failed(String),
    Unconfigured,
}

impl CallOutcome {
    /// Collapse into the optional payload value, logging degraded outcomes.
    pub fn into_value(self, connector: &str) -> Option<Value> {
        match self {
            CallOutcome::Ok(value) => Some(value),
            CallOutcome::Failed(reason) => {
                warn!(connector, %reason, "connector call failed, omitting field");
                None
            }
            CallOutcome::Unconfigured => {
                debug!(connector, "connector not configured, omitting field");
                None
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CallOutcome::Ok(_))
    }
}

/// Bearer-auth credential probe shared by all connectors. Any transport
/// fault or non-200 status reads as not authenticated.
async fn check_auth(client: &Client, url: &str, api_key: &str) -> bool {
    match client.get(url).bearer_auth(api_key).send().await {
        Ok(resp) => resp.status() == StatusCode::OK,
        Err(e) => {
            warn!(%url, error = %e, "authentication probe failed");
            false
        }
    }
}

/// Bearer-auth JSON POST shared by all connectors.
async fn post_json(
    client: &Client,
    url: &str,
    api_key: &str,
    request: &Value,
    expect: StatusCode,
) -> CallOutcome {
    match client
        .post(url)
        .bearer_auth(api_key)
        .json(request)
        .send()
        .await
    {
        Ok(resp) if resp.status() == expect => match resp.json::<Value>().await {
            Ok(value) => CallOutcome::Ok(value),
            Err(e) => CallOutcome::Failed(format!("invalid response body: {e}")),
        },
        Ok(resp) => CallOutcome::Failed(format!("HTTP {}", resp.status())),
        Err(e) => CallOutcome::Failed(e.to_string()),
    }
}

/// The three shared connector handles wired into every registered agent.
///
/// All optional: an absent connector degrades the calls that would have used
/// it. Handles are read-mostly and shared by reference counting; the
/// environment owns the canonical copy.
#[derive(Clone, Default)]
pub struct Connectors {
    pub crewai: Option<Arc<CrewAiConnector>>,
    pub taskade: Option<Arc<TaskadeConnector>>,
    pub abacus: Option<Arc<AbacusConnector>>,
}

impl Connectors {
    pub async fn crewai_create_agent(&self, request: Value) -> CallOutcome {
        match &self.crewai {
            Some(connector) => connector.create_agent(request).await,
            None => CallOutcome::Unconfigured,
        }
    }

    pub async fn taskade_create_task(&self, request: Value) -> CallOutcome {
        match &self.taskade {
            Some(connector) => connector.create_task(request).await,
            None => CallOutcome::Unconfigured,
        }
    }

    pub async fn abacus_predict(&self, request: Value) -> CallOutcome {
        match &self.abacus {
            Some(connector) => connector.get_model_prediction(request).await,
            None => CallOutcome::Unconfigured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outcome_collapses_degraded_cases_to_none() {
        assert_eq!(
            CallOutcome::Ok(json!({"id": 1})).into_value("crewai"),
            Some(json!({"id": 1}))
        );
        assert_eq!(
            CallOutcome::Failed("HTTP 500".to_string()).into_value("crewai"),
            None
        );
        assert_eq!(CallOutcome::Unconfigured.into_value("crewai"), None);
    }

    #[tokio::test]
    async fn authenticate_is_false_when_endpoint_unreachable() {
        // Nothing listens on port 1; the probe must degrade, not error.
        let unreachable = "http://127.0.0.1:1";
        assert!(!CrewAiConnector::with_base_url("key", unreachable).authenticate().await);
        assert!(!TaskadeConnector::with_base_url("key", unreachable).authenticate().await);
        assert!(!AbacusConnector::with_base_url("key", unreachable).authenticate().await);
    }

    #[tokio::test]
    async fn unset_handles_report_unconfigured() {
        let connectors = Connectors::default();
        let outcome = connectors.crewai_create_agent(json!({})).await;
        assert!(matches!(outcome, CallOutcome::Unconfigured));
        assert!(!outcome.is_ok());
    }
}
