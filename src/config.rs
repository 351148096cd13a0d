use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub projects: ProjectsConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub connectors: ConnectorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectsConfig {
    /// Root directory for locally created projects (default: ~/projects)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MemoryConfig {
    /// Data directory for the SQLite store (default: ~/.boulevard)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Optional credentials per external integration. An unset connector leaves
/// its calls unconfigured; agents degrade gracefully.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConnectorsConfig {
    #[serde(default)]
    pub crewai: Option<ConnectorCredentials>,
    #[serde(default)]
    pub taskade: Option<ConnectorCredentials>,
    #[serde(default)]
    pub abacus: Option<ConnectorCredentials>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorCredentials {
    pub api_key: String,
    /// Override the connector's default endpoint
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("logging.level", "info")?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("BOULEVARD_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (BOULEVARD_PROJECTS__DIR, etc.)
            .add_source(
                Environment::with_prefix("BOULEVARD")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Root directory for locally created projects.
    pub fn projects_dir(&self) -> PathBuf {
        self.projects.dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("projects")
        })
    }

    /// Data directory for the persistent memory store.
    pub fn memory_dir(&self) -> PathBuf {
        self.memory.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".boulevard")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_config_files() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(config.connectors.crewai.is_none());
        assert!(config.projects_dir().ends_with("projects"));
    }
}
