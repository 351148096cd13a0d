//! Project manager agent — project registry and coordination.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{json, Value};
use tracing::info;

use crate::domain::{Task, TaskKind, TaskResult};
use crate::error::Result;

use super::core::AgentCore;
use super::traits::Agent;

pub struct ProjectManagerAgent {
    core: AgentCore,
    /// Volatile project registry; lost on restart by design.
    active_projects: DashMap<String, Value>,
}

impl ProjectManagerAgent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: AgentCore::new(id, &["project_management", "coordination"]),
            active_projects: DashMap::new(),
        }
    }

    pub fn project(&self, name: &str) -> Option<Value> {
        self.active_projects
            .get(name)
            .map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl Agent for ProjectManagerAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn process_task(&self, task: Task) -> Result<TaskResult> {
        match task.kind {
            TaskKind::CreateProject { name, framework } => {
                let entry = json!({
                    "status": "initializing",
                    "framework": framework,
                    "created_at": Utc::now().to_rfc3339(),
                });
                self.active_projects.insert(name.clone(), entry.clone());

                info!(agent = %self.id(), project = %name, "project initialized");
                Ok(TaskResult::success()
                    .with_message(format!("Project {name} initialized"))
                    .with("project_details", entry))
            }
            _ => Ok(TaskResult::error("Unsupported task type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_project_overwrites_on_name_reuse() {
        let agent = ProjectManagerAgent::new("pm-1");

        for framework in ["flask", "react"] {
            let result = agent
                .handle_task(Task::new(
                    TaskKind::CreateProject {
                        name: "demo".to_string(),
                        framework: framework.to_string(),
                    },
                    vec!["pm-1".to_string()],
                ))
                .await;
            assert!(result.is_success());
        }

        let stored = agent.project("demo").expect("project should be stored");
        assert_eq!(stored["framework"], "react");
        assert_eq!(stored["status"], "initializing");
    }
}
