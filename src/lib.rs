pub mod agents;
pub mod app;
pub mod cli;
pub mod config;
pub mod connectors;
pub mod domain;
pub mod environment;
pub mod error;
pub mod memory;
pub mod templates;

pub use agents::{
    Agent, AgentCore, BuilderAgent, ContentGeneratorAgent, CryptoTradingAgent, Mailbox, Message,
    OpportunityScoutAgent, ProjectManagerAgent, TrendWatcherAgent,
};
pub use app::LocalAppBuilder;
pub use config::AppConfig;
pub use connectors::{AbacusConnector, CallOutcome, Connectors, CrewAiConnector, TaskadeConnector};
pub use domain::{Framework, Task, TaskKind, TaskResult, TaskStatus, TradeAction};
pub use environment::Environment;
pub use error::{BoulevardError, Result};
pub use memory::{MemoryManager, ProjectRecord};
pub use templates::TemplateManager;
