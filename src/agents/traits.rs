//! The single capability interface every agent role implements.
//!
//! Roles are independent implementations registered into the environment;
//! there is no base-class hierarchy. Shared behavior lives in [`AgentCore`]
//! and the provided methods here.

use async_trait::async_trait;
use serde_json::Value;
use tracing::error;

use crate::domain::{Task, TaskResult};
use crate::error::Result;

use super::core::{AgentCore, Mailbox, Message};

#[async_trait]
pub trait Agent: Send + Sync {
    /// Shared agent state (identity, mailbox, busy flag, connectors).
    fn core(&self) -> &AgentCore;

    fn id(&self) -> &str {
        self.core().id()
    }

    fn capabilities(&self) -> &[String] {
        self.core().capabilities()
    }

    fn mailbox(&self) -> Mailbox {
        self.core().mailbox()
    }

    /// Dispatch one task. An unrecognized kind or a missing required field
    /// yields an error result. Infrastructure faults may surface as `Err`;
    /// they are converted at the [`Agent::handle_task`] boundary.
    async fn process_task(&self, task: Task) -> Result<TaskResult>;

    /// Task entry point used by the environment.
    ///
    /// Serializes processing on this instance, keeps the advisory busy flag
    /// accurate on every exit path and never lets a fault escape.
    async fn handle_task(&self, task: Task) -> TaskResult {
        let _guard = self.core().begin_task().await;
        match self.process_task(task).await {
            Ok(result) => result,
            Err(e) => {
                error!(agent = %self.id(), error = %e, "task processing fault");
                TaskResult::error(e.to_string())
            }
        }
    }

    fn send_message(&self, target: &Mailbox, content: Value) {
        self.core().send_message(target, content);
    }

    async fn receive_message(&self) -> Option<Message> {
        self.core().receive_message().await
    }
}
