//! boulevard CLI — create and manage local projects.
//!
//! Commands:
//! - `boulevard create <framework> <name>` - scaffold a new local project
//! - `boulevard list` - list projects recorded in memory

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tabled::{Table, Tabled};

use crate::app::LocalAppBuilder;
use crate::domain::Framework;
use crate::error::Result;

/// Boulevard multi-agent app builder CLI
#[derive(Parser, Debug)]
#[command(name = "boulevard")]
#[command(author, version, about = "Create and manage local applications")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    Create {
        /// Project framework
        #[arg(value_enum)]
        framework: Framework,
        /// Project name
        name: String,
    },
    /// List all projects
    List,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Framework")]
    framework: String,
    #[tabled(rename = "Created")]
    created_at: String,
}

pub async fn create_project(app: &LocalAppBuilder, framework: Framework, name: &str) -> Result<()> {
    let result = app.create_project(framework.as_str(), name).await;
    if result.is_success() {
        println!("Created {framework} project: {name}");
        if let Some(command) = result.get("start_command").and_then(|v| v.as_str()) {
            println!("Start it with: {command}");
        }
        Ok(())
    } else {
        let reason = result.message.unwrap_or_else(|| "unknown error".to_string());
        Err(anyhow!("Failed to create project: {reason}").into())
    }
}

pub async fn list_projects(app: &LocalAppBuilder) -> Result<()> {
    let projects = app.list_projects().await?;
    if projects.is_empty() {
        println!("No projects yet");
        return Ok(());
    }

    let rows: Vec<ProjectRow> = projects
        .into_iter()
        .map(|p| ProjectRow {
            name: p.name,
            framework: p
                .details
                .get("framework")
                .and_then(|v| v.as_str())
                .unwrap_or("-")
                .to_string(),
            created_at: p.created_at.format("%Y-%m-%d %H:%M").to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    Ok(())
}
