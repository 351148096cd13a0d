//! Shared per-agent state: identity, mailbox, busy flag and the task gate.
//!
//! The busy flag is advisory status only. Mutual exclusion comes from the
//! task gate: a mutex acquired for the whole of one `process_task` call, so
//! two logically concurrent invocations on the same instance serialize
//! instead of racing on agent-local state.

use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, Mutex, MutexGuard, RwLock};
use tracing::{debug, warn};

use crate::connectors::Connectors;

/// A message delivered to an agent's mailbox. Created on send, consumed
/// exactly once on receive.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub from: String,
    pub content: Value,
}

/// Cloneable enqueue handle for one agent's mailbox. Anyone may enqueue;
/// only the owning agent holds the receiving end.
#[derive(Clone)]
pub struct Mailbox {
    sender: mpsc::UnboundedSender<Message>,
}

impl Mailbox {
    fn push(&self, message: Message) -> bool {
        self.sender.send(message).is_ok()
    }
}

/// State every agent shares regardless of role.
pub struct AgentCore {
    id: String,
    capabilities: Vec<String>,
    mailbox: Mailbox,
    inbox: Mutex<mpsc::UnboundedReceiver<Message>>,
    busy: AtomicBool,
    task_gate: Mutex<()>,
    connectors: RwLock<Connectors>,
}

impl AgentCore {
    pub fn new(id: impl Into<String>, capabilities: &[&str]) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = id.into();
        debug!(agent = %id, ?capabilities, "agent core initialized");
        Self {
            id,
            capabilities: capabilities.iter().map(|c| c.to_string()).collect(),
            mailbox: Mailbox { sender },
            inbox: Mutex::new(receiver),
            busy: AtomicBool::new(false),
            task_gate: Mutex::new(()),
            connectors: RwLock::new(Connectors::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Advisory capability tags; the router does not consult them.
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    /// Enqueue handle other agents can use to reach this one.
    pub fn mailbox(&self) -> Mailbox {
        self.mailbox.clone()
    }

    /// Advisory status flag: true exactly while a task is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Install the shared connector handles. Called by the environment at
    /// registration time; this is the dependency-injection point.
    pub async fn set_connectors(&self, connectors: Connectors) {
        *self.connectors.write().await = connectors;
    }

    pub async fn connectors(&self) -> Connectors {
        self.connectors.read().await.clone()
    }

    /// Send a message to another agent's mailbox. Never blocks the sender
    /// and carries no acknowledgement.
    pub fn send_message(&self, target: &Mailbox, content: Value) {
        let message = Message {
            from: self.id.clone(),
            content,
        };
        if target.push(message) {
            debug!(from = %self.id, "message sent");
        } else {
            warn!(from = %self.id, "message dropped: target mailbox closed");
        }
    }

    /// Wait until a message is available in this agent's own mailbox.
    /// Returns `None` when the mailbox can no longer deliver.
    pub async fn receive_message(&self) -> Option<Message> {
        let mut inbox = self.inbox.lock().await;
        match inbox.recv().await {
            Some(message) => {
                debug!(agent = %self.id, from = %message.from, "message received");
                Some(message)
            }
            None => {
                warn!(agent = %self.id, "receive failed: mailbox closed");
                None
            }
        }
    }

    /// Non-blocking mailbox poll.
    pub fn try_receive_message(&self) -> Option<Message> {
        self.inbox.try_lock().ok()?.try_recv().ok()
    }

    /// Acquire the single-flight gate, marking the agent busy until the
    /// returned guard is dropped.
    pub async fn begin_task(&self) -> TaskGuard<'_> {
        let permit = self.task_gate.lock().await;
        self.busy.store(true, Ordering::SeqCst);
        TaskGuard {
            _permit: permit,
            busy: &self.busy,
        }
    }
}

/// Clears the busy flag on every exit path, including panics in tests.
pub struct TaskGuard<'a> {
    _permit: MutexGuard<'a, ()>,
    busy: &'a AtomicBool,
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn message_round_trip_preserves_sender_and_content() {
        let alice = AgentCore::new("alice", &["chat"]);
        let bob = AgentCore::new("bob", &["chat"]);

        alice.send_message(&bob.mailbox(), json!({"greeting": "hello"}));

        let message = bob.receive_message().await.expect("message should arrive");
        assert_eq!(message.from, "alice");
        assert_eq!(message.content, json!({"greeting": "hello"}));
        assert!(bob.try_receive_message().is_none());
    }

    #[tokio::test]
    async fn mailbox_preserves_global_insertion_order() {
        let a = AgentCore::new("a", &[]);
        let b = AgentCore::new("b", &[]);
        let owner = AgentCore::new("owner", &[]);

        a.send_message(&owner.mailbox(), json!(1));
        b.send_message(&owner.mailbox(), json!(2));
        a.send_message(&owner.mailbox(), json!(3));

        for expected in 1..=3 {
            let message = owner.receive_message().await.unwrap();
            assert_eq!(message.content, json!(expected));
        }
    }

    #[tokio::test]
    async fn busy_flag_tracks_task_guard_lifetime() {
        let core = AgentCore::new("worker", &[]);
        assert!(!core.is_busy());
        {
            let _guard = core.begin_task().await;
            assert!(core.is_busy());
        }
        assert!(!core.is_busy());
    }
}
