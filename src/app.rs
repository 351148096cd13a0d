//! Driver wiring: config → connectors → environment → agent roster.

use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::agents::{
    BuilderAgent, ContentGeneratorAgent, CryptoTradingAgent, OpportunityScoutAgent,
    ProjectManagerAgent, TrendWatcherAgent,
};
use crate::config::AppConfig;
use crate::connectors::{AbacusConnector, Connectors, CrewAiConnector, TaskadeConnector};
use crate::domain::{Task, TaskKind, TaskResult};
use crate::environment::Environment;
use crate::error::Result;
use crate::memory::{MemoryManager, ProjectRecord};

/// The composed system: persistent memory, environment and the fixed agent
/// roster the CLI drives.
pub struct LocalAppBuilder {
    memory: MemoryManager,
    environment: Environment,
}

impl LocalAppBuilder {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let memory = MemoryManager::open(&config.memory_dir()).await?;
        let connectors = build_connectors(config);
        let mut environment = Environment::new(connectors, config.projects_dir())?;

        environment
            .register_agent(Box::new(BuilderAgent::new("builder-1")))
            .await;
        environment
            .register_agent(Box::new(ProjectManagerAgent::new("pm-1")))
            .await;
        environment
            .register_agent(Box::new(TrendWatcherAgent::new("trends-1")))
            .await;
        environment
            .register_agent(Box::new(ContentGeneratorAgent::new("content-1")))
            .await;
        environment
            .register_agent(Box::new(CryptoTradingAgent::new("crypto-1")))
            .await;
        environment
            .register_agent(Box::new(OpportunityScoutAgent::new("scout-1")))
            .await;

        info!("local app builder initialized");
        Ok(Self {
            memory,
            environment,
        })
    }

    /// Create a new local project: initialize it with the project manager,
    /// then run the local build through the builder agent. Successful builds
    /// are persisted to memory.
    pub async fn create_project(&self, framework: &str, project_name: &str) -> TaskResult {
        let pm_task = Task::new(
            TaskKind::CreateProject {
                name: project_name.to_string(),
                framework: framework.to_string(),
            },
            vec!["pm-1".to_string()],
        );
        let pm_result = self.environment.distribute_task(pm_task).await;
        if !pm_result.is_success() {
            return pm_result;
        }

        let build_task = Task::new(
            TaskKind::LocalBuild {
                framework: framework.to_string(),
                project_name: project_name.to_string(),
                project_path: Some(self.environment.project_path(project_name)),
            },
            vec!["builder-1".to_string()],
        );
        let build_result = self.environment.distribute_task(build_task).await;

        if build_result.is_success() {
            let details = json!({
                "framework": framework,
                "status": "created",
                "build_result": build_result.payload.clone(),
            });
            if let Err(e) = self
                .memory
                .store_project_details(project_name, &details)
                .await
            {
                error!(error = %e, "failed to persist project details");
            }
        }
        build_result
    }

    /// All projects recorded in persistent memory.
    pub async fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        self.memory.get_all_projects().await
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

fn build_connectors(config: &AppConfig) -> Connectors {
    let c = &config.connectors;
    Connectors {
        crewai: c.crewai.as_ref().map(|cred| {
            Arc::new(match &cred.base_url {
                Some(url) => CrewAiConnector::with_base_url(&cred.api_key, url),
                None => CrewAiConnector::new(&cred.api_key),
            })
        }),
        taskade: c.taskade.as_ref().map(|cred| {
            Arc::new(match &cred.base_url {
                Some(url) => TaskadeConnector::with_base_url(&cred.api_key, url),
                None => TaskadeConnector::new(&cred.api_key),
            })
        }),
        abacus: c.abacus.as_ref().map(|cred| {
            Arc::new(match &cred.base_url {
                Some(url) => AbacusConnector::with_base_url(&cred.api_key, url),
                None => AbacusConnector::new(&cred.api_key),
            })
        }),
    }
}
