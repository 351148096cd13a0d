//! Builder agent — cloud build tracking and local project scaffolding.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::domain::{Framework, Task, TaskKind, TaskResult};
use crate::error::Result;
use crate::templates::TemplateManager;

use super::core::AgentCore;
use super::traits::Agent;

/// Fixed delay simulating the remote build pipeline.
const BUILD_DELAY: Duration = Duration::from_secs(2);

pub struct BuilderAgent {
    core: AgentCore,
    templates: TemplateManager,
    /// Per-project build configuration, overwritten on name reuse.
    build_configs: DashMap<String, Value>,
    build_delay: Duration,
}

impl BuilderAgent {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            core: AgentCore::new(id, &["build", "deploy", "local_build"]),
            templates: TemplateManager::new(),
            build_configs: DashMap::new(),
            build_delay: BUILD_DELAY,
        }
    }

    /// Override the simulated build delay (tests use zero).
    pub fn with_build_delay(mut self, delay: Duration) -> Self {
        self.build_delay = delay;
        self
    }

    /// Stored build configuration for a locally-built project, if any.
    pub fn build_config(&self, project_name: &str) -> Option<Value> {
        self.build_configs
            .get(project_name)
            .map(|entry| entry.value().clone())
    }

    async fn run_build(&self, framework: &str, project_name: &str) -> Result<TaskResult> {
        let framework = match framework.parse::<Framework>() {
            Ok(f) => f,
            Err(_) => {
                return Ok(TaskResult::error(format!(
                    "Unsupported framework: {framework}"
                )))
            }
        };

        info!(agent = %self.id(), %framework, project = project_name, "starting build");
        let connectors = self.core.connectors().await;

        let crewai_task = connectors
            .crewai_create_agent(json!({
                "task": format!("Build {framework} application: {project_name}"),
                "role": "builder",
                "goal": format!("Successfully create and configure {framework} application"),
            }))
            .await
            .into_value("crewai");

        let taskade_item = connectors
            .taskade_create_task(json!({
                "title": format!("Build {framework} app: {project_name}"),
                "description": format!("Create and configure new {framework} application"),
                "status": "in_progress",
            }))
            .await
            .into_value("taskade");

        // Build recommendation is advisory; the response is not folded into
        // the result.
        let _ = connectors
            .abacus_predict(json!({
                "framework": framework.as_str(),
                "project_type": "application",
                "context": project_name,
            }))
            .await
            .into_value("abacus");

        tokio::time::sleep(self.build_delay).await;

        let mut result = TaskResult::success()
            .with_message(format!("Successfully built {framework} application"))
            .with("framework", json!(framework.as_str()))
            .with_timestamp();
        if let Some(id) = crewai_task.as_ref().and_then(|v| v.get("id")) {
            result = result.with("crewai_task_id", id.clone());
        }
        if let Some(id) = taskade_item.as_ref().and_then(|v| v.get("id")) {
            result = result.with("taskade_item_id", id.clone());
        }

        info!(agent = %self.id(), project = project_name, "build completed");
        Ok(result)
    }

    /// Scaffold a project on disk and remember its build configuration.
    ///
    /// The framework check runs before any filesystem mutation.
    pub async fn create_local_project(
        &self,
        framework: &str,
        project_name: &str,
        project_path: &Path,
    ) -> Result<TaskResult> {
        let framework = match framework.parse::<Framework>() {
            Ok(f) => f,
            Err(_) => {
                return Ok(TaskResult::error(format!(
                    "Unsupported framework: {framework}"
                )))
            }
        };

        info!(
            agent = %self.id(),
            %framework,
            project = project_name,
            path = %project_path.display(),
            "creating local project"
        );

        self.templates
            .apply_template(framework, project_path, project_name)
            .await?;
        self.templates
            .run_install_commands(framework, project_path)
            .await?;

        let start_command = self.templates.get_start_command(framework);
        let config = json!({
            "framework": framework.as_str(),
            "created_at": Utc::now().to_rfc3339(),
            "project_path": project_path.display().to_string(),
            "start_command": start_command,
        });
        self.build_configs
            .insert(project_name.to_string(), config.clone());

        Ok(TaskResult::success()
            .with_message(format!("Local project {project_name} created successfully"))
            .with("project_details", config)
            .with("start_command", json!(start_command)))
    }
}

#[async_trait]
impl Agent for BuilderAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn process_task(&self, task: Task) -> Result<TaskResult> {
        match task.kind {
            TaskKind::Build {
                framework,
                project_name,
            } => self.run_build(&framework, &project_name).await,
            TaskKind::LocalBuild {
                framework,
                project_name,
                project_path,
            } => {
                let Some(path) = project_path else {
                    return Ok(TaskResult::error(
                        "Project path is required for local build",
                    ));
                };
                self.create_local_project(&framework, &project_name, &path)
                    .await
            }
            _ => Ok(TaskResult::error("Unsupported task type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(kind: TaskKind) -> Task {
        Task::new(kind, vec!["builder-1".to_string()])
    }

    #[tokio::test]
    async fn build_rejects_unsupported_framework() {
        let agent = BuilderAgent::new("builder-1").with_build_delay(Duration::ZERO);
        let result = agent
            .handle_task(task(TaskKind::Build {
                framework: "svelte".to_string(),
                project_name: "demo".to_string(),
            }))
            .await;
        assert!(!result.is_success());
        assert_eq!(
            result.message.as_deref(),
            Some("Unsupported framework: svelte")
        );
    }

    #[tokio::test]
    async fn local_build_requires_project_path() {
        let agent = BuilderAgent::new("builder-1");
        let result = agent
            .handle_task(task(TaskKind::LocalBuild {
                framework: "flask".to_string(),
                project_name: "demo".to_string(),
                project_path: None,
            }))
            .await;
        assert!(!result.is_success());
        assert_eq!(
            result.message.as_deref(),
            Some("Project path is required for local build")
        );
    }

    #[tokio::test]
    async fn foreign_task_kinds_are_rejected() {
        let agent = BuilderAgent::new("builder-1");
        let result = agent.handle_task(task(TaskKind::MonitorTrends)).await;
        assert_eq!(result.message.as_deref(), Some("Unsupported task type"));
    }
}
