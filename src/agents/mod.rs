//! Agent roles and the shared state that backs them.
//!
//! Each role is an independent [`Agent`] implementation registered into the
//! environment; shared identity, mailbox and single-flight machinery live in
//! [`AgentCore`].

pub mod builder;
pub mod content_generator;
pub mod core;
pub mod crypto_trading;
pub mod opportunity_scout;
pub mod project_manager;
pub mod traits;
pub mod trend_watcher;

pub use builder::BuilderAgent;
pub use content_generator::ContentGeneratorAgent;
pub use core::{AgentCore, Mailbox, Message, TaskGuard};
pub use crypto_trading::CryptoTradingAgent;
pub use opportunity_scout::OpportunityScoutAgent;
pub use project_manager::ProjectManagerAgent;
pub use traits::Agent;
pub use trend_watcher::TrendWatcherAgent;
