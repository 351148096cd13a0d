//! Content generator agent — faceless content creation and optimization.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::{Task, TaskKind, TaskResult};
use crate::error::Result;

use super::core::AgentCore;
use super::traits::Agent;

pub struct ContentGeneratorAgent {
    core: AgentCore,
}

impl ContentGeneratorAgent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: AgentCore::new(id, &["content_generation", "content_optimization"]),
        }
    }
}

#[async_trait]
impl Agent for ContentGeneratorAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn process_task(&self, task: Task) -> Result<TaskResult> {
        match task.kind {
            TaskKind::GenerateContent {
                content_type,
                topic,
            } => {
                info!(agent = %self.id(), %content_type, %topic, "generating content");
                let connectors = self.core.connectors().await;

                let content = connectors
                    .crewai_create_agent(json!({
                        "task": format!("Generate {content_type} about {topic}"),
                        "role": "content_creator",
                        "goal": "Create engaging, SEO-optimized content",
                    }))
                    .await
                    .into_value("crewai");

                let optimization = connectors
                    .abacus_predict(json!({
                        "content_type": content_type,
                        "topic": topic,
                        "context": "content_optimization",
                    }))
                    .await
                    .into_value("abacus");

                Ok(TaskResult::success()
                    .with("content", content.unwrap_or_else(|| json!({})))
                    .with(
                        "optimization_suggestions",
                        optimization.unwrap_or_else(|| json!({})),
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
    async fn degrades_to_empty_objects_without_connectors() {
        let agent = ContentGeneratorAgent::new("content-1");
        let result = agent
            .handle_task(Task::new(
                TaskKind::GenerateContent {
                    content_type: "article".to_string(),
                    topic: "rust".to_string(),
                },
                vec!["content-1".to_string()],
            ))
            .await;
        assert!(result.is_success());
        assert_eq!(result.get("content"), Some(&json!({})));
        assert_eq!(result.get("optimization_suggestions"), Some(&json!({})));
    }
}
