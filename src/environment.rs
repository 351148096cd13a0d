//! Environment — the composition root.
//!
//! Owns the agent registry, injects the shared connector handles at
//! registration and routes incoming tasks to the first registered agent
//! whose id appears in the task's target list.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, trace, warn};

use crate::agents::Agent;
use crate::connectors::Connectors;
use crate::domain::{Task, TaskKind, TaskResult};
use crate::error::Result;

pub struct Environment {
    /// Registered agents in insertion order; a reused id replaces the
    /// earlier agent in place, keeping its routing position.
    agents: Vec<Box<dyn Agent>>,
    connectors: Connectors,
    projects_dir: PathBuf,
}

impl Environment {
    pub fn new(connectors: Connectors, projects_dir: impl Into<PathBuf>) -> Result<Self> {
        let projects_dir = projects_dir.into();
        std::fs::create_dir_all(&projects_dir)?;
        info!(dir = %projects_dir.display(), "environment initialized");
        Ok(Self {
            agents: Vec::new(),
            connectors,
            projects_dir,
        })
    }

    /// Register an agent and inject the shared connector handles into it.
    ///
    /// This is the system's dependency-injection point. A reused id silently
    /// overwrites the earlier registration; last write wins.
    pub async fn register_agent(&mut self, agent: Box<dyn Agent>) {
        agent.core().set_connectors(self.connectors.clone()).await;
        info!(
            agent = %agent.id(),
            capabilities = ?agent.capabilities(),
            "agent registered"
        );
        match self.agents.iter().position(|a| a.id() == agent.id()) {
            Some(pos) => self.agents[pos] = agent,
            None => self.agents.push(agent),
        }
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn is_registered(&self, agent_id: &str) -> bool {
        self.agents.iter().any(|a| a.id() == agent_id)
    }

    pub fn registered_agents(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.id().to_string()).collect()
    }

    /// Look up a registered agent by id.
    pub fn agent(&self, agent_id: &str) -> Option<&dyn Agent> {
        self.agents
            .iter()
            .find(|a| a.id() == agent_id)
            .map(|a| a.as_ref())
    }

    /// Local path a project of the given name would be created at.
    pub fn project_path(&self, project_name: &str) -> PathBuf {
        self.projects_dir.join(project_name)
    }

    /// Route a task to the first registered agent whose id appears in the
    /// task's target list and return that agent's result.
    ///
    /// First-match routing, not broadcast: even if several agents qualify,
    /// exactly one processes the task. `LocalBuild` tasks get their project
    /// directory seeded here before any agent is involved; a seeding failure
    /// short-circuits with that failure and no agent is invoked.
    pub async fn distribute_task(&self, task: Task) -> TaskResult {
        if let TaskKind::LocalBuild {
            framework,
            project_name,
            project_path,
        } = &task.kind
        {
            let Some(path) = project_path else {
                return TaskResult::error("Project path is required for local build");
            };
            if let Err(e) = self.seed_project_dir(framework, project_name, path).await {
                warn!(error = %e, "local project seeding failed");
                return TaskResult::error(e.to_string());
            }
        }

        for agent in &self.agents {
            if task.target_agents.iter().any(|id| id == agent.id()) {
                info!(agent = %agent.id(), task = task.kind.name(), "distributing task");
                let result = agent.handle_task(task).await;
                debug!(success = result.is_success(), "task result returned");
                return result;
            }
        }

        warn!(targets = ?task.target_agents, "no suitable agent found for task");
        TaskResult::error("No suitable agent found")
    }

    /// Create the project directory and seed a README before the builder
    /// takes over.
    async fn seed_project_dir(
        &self,
        framework: &str,
        project_name: &str,
        path: &Path,
    ) -> Result<()> {
        fs::create_dir_all(path).await?;
        fs::write(
            path.join("README.md"),
            format!("# {project_name}\n\nA {framework} project.\n"),
        )
        .await?;
        info!(path = %path.display(), "created local project directory");
        Ok(())
    }

    /// Fixed-period liveness loop. Carries no processing responsibility;
    /// routing happens synchronously in [`Environment::distribute_task`].
    pub async fn run(&self) {
        let mut tick = tokio::time::interval(Duration::from_secs(1));
        loop {
            tick.tick().await;
            trace!(agents = self.agents.len(), "environment heartbeat");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ProjectManagerAgent;

    fn create_project_task(targets: &[&str]) -> Task {
        Task::new(
            TaskKind::CreateProject {
                name: "demo".to_string(),
                framework: "flask".to_string(),
            },
            targets.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("boulevard-env-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn routes_to_registered_target() {
        let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
        env.register_agent(Box::new(ProjectManagerAgent::new("pm-1")))
            .await;

        let result = env.distribute_task(create_project_task(&["pm-1"])).await;
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn unmatched_target_list_yields_routing_error() {
        let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
        env.register_agent(Box::new(ProjectManagerAgent::new("pm-1")))
            .await;

        for targets in [&[][..], &["ghost-1"][..]] {
            let result = env.distribute_task(create_project_task(targets)).await;
            assert!(!result.is_success());
            assert_eq!(result.message.as_deref(), Some("No suitable agent found"));
        }
    }

    #[tokio::test]
    async fn reregistration_overwrites_without_error() {
        let mut env = Environment::new(Connectors::default(), scratch_dir()).unwrap();
        env.register_agent(Box::new(ProjectManagerAgent::new("pm-1")))
            .await;
        env.register_agent(Box::new(ProjectManagerAgent::new("pm-1")))
            .await;

        assert_eq!(env.agent_count(), 1);
        assert!(env.is_registered("pm-1"));
    }
}
