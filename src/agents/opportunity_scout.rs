//! Opportunity scout agent — business opportunity discovery and evaluation.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::{Task, TaskKind, TaskResult};
use crate::error::Result;

use super::core::AgentCore;
use super::traits::Agent;

pub struct OpportunityScoutAgent {
    core: AgentCore,
}

impl OpportunityScoutAgent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: AgentCore::new(id, &["opportunity_analysis", "market_research"]),
        }
    }
}

#[async_trait]
impl Agent for OpportunityScoutAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn process_task(&self, task: Task) -> Result<TaskResult> {
        match task.kind {
            TaskKind::ScoutOpportunities { context } => {
                info!(agent = %self.id(), %context, "scouting opportunities");
                let connectors = self.core.connectors().await;

                let opportunities = connectors
                    .crewai_create_agent(json!({
                        "task": "Scout new business opportunities",
                        "role": "opportunity_analyst",
                        "goal": "Identify profitable business ventures",
                    }))
                    .await
                    .into_value("crewai");

                let market_analysis = connectors
                    .abacus_predict(json!({
                        "analysis_type": "market_opportunity",
                        "context": context,
                    }))
                    .await
                    .into_value("abacus");

                let _ = connectors
                    .taskade_create_task(json!({
                        "title": format!("Opportunity Analysis: {}", Utc::now().format("%Y-%m-%d")),
                        "description": "New business opportunity analysis",
                        "status": "in_progress",
                    }))
                    .await
                    .into_value("taskade");

                Ok(TaskResult::success()
                    .with("opportunities", opportunities.unwrap_or_else(|| json!([])))
                    .with(
                        "market_analysis",
                        market_analysis.unwrap_or_else(|| json!({})),
                    )
                    .with_timestamp())
            }
            _ => Ok(TaskResult::error("Unsupported task type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn degrades_gracefully_without_connectors() {
        let agent = OpportunityScoutAgent::new("scout-1");
        let result = agent
            .handle_task(Task::new(
                TaskKind::ScoutOpportunities {
                    context: "general".to_string(),
                },
                vec!["scout-1".to_string()],
            ))
            .await;
        assert!(result.is_success());
        assert_eq!(result.get("opportunities"), Some(&json!([])));
        assert_eq!(result.get("market_analysis"), Some(&json!({})));
    }
}
