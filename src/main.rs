use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use boulevard::app::LocalAppBuilder;
use boulevard::cli::{self, Cli, Commands};
use boulevard::config::AppConfig;
use boulevard::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    init_logging(&config.logging.level);

    let app = LocalAppBuilder::new(&config).await?;

    match cli.command {
        Commands::Create { framework, name } => {
            info!(%framework, %name, "creating new project");
            cli::create_project(&app, framework, &name).await?;
        }
        Commands::List => {
            cli::list_projects(&app).await?;
        }
    }

    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},boulevard=debug,sqlx=warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
