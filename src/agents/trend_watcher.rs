//! Trend watcher agent — online trend and news monitoring.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::domain::{Task, TaskKind, TaskResult};
use crate::error::Result;

use super::core::AgentCore;
use super::traits::Agent;

pub struct TrendWatcherAgent {
    core: AgentCore,
}

impl TrendWatcherAgent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: AgentCore::new(id, &["trend_monitoring", "news_analysis"]),
        }
    }
}

#[async_trait]
impl Agent for TrendWatcherAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn process_task(&self, task: Task) -> Result<TaskResult> {
        match task.kind {
            TaskKind::MonitorTrends => {
                info!(agent = %self.id(), "monitoring trends");
                let connectors = self.core.connectors().await;

                let trend_analysis = connectors
                    .crewai_create_agent(json!({
                        "task": "Analyze current online trends",
                        "role": "trend_analyst",
                        "goal": "Identify profitable content opportunities",
                    }))
                    .await
                    .into_value("crewai");

                // Tracking item is fire-and-forget; only the analysis feeds
                // the result.
                let _ = connectors
                    .taskade_create_task(json!({
                        "title": format!("Trend Analysis: {}", Utc::now().format("%Y-%m-%d")),
                        "description": "Analyzing trends for content opportunities",
                        "status": "in_progress",
                    }))
                    .await
                    .into_value("taskade");

                Ok(TaskResult::success()
                    .with("trends", trend_analysis.unwrap_or_else(|| json!([])))
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
    async fn degrades_to_empty_trends_without_connectors() {
        let agent = TrendWatcherAgent::new("trends-1");
        let result = agent
            .handle_task(Task::new(
                TaskKind::MonitorTrends,
                vec!["trends-1".to_string()],
            ))
            .await;
        assert!(result.is_success());
        assert_eq!(result.get("trends"), Some(&json!([])));
        assert!(result.get("timestamp").is_some());
    }
}
