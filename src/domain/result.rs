//! Structured task results.
//!
//! Every agent and the environment speak the same result shape: a status, a
//! human-readable message (required on error) and a map of task-specific
//! payload fields. Optional integrations that are absent or failed simply
//! leave their field out of the payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl TaskResult {
    pub fn success() -> Self {
        Self {
            status: TaskStatus::Success,
            message: None,
            payload: Map::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: TaskStatus::Error,
            message: Some(message.into()),
            payload: Map::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach a payload field.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.payload.insert(key.to_string(), value);
        self
    }

    /// Attach the completion timestamp (RFC 3339).
    pub fn with_timestamp(self) -> Self {
        let now = Utc::now().to_rfc3339();
        self.with("timestamp", Value::String(now))
    }

    pub fn is_success(&self) -> bool {
        self.status == TaskStatus::Success
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_carries_message() {
        let result = TaskResult::error("No suitable agent found");
        assert!(!result.is_success());
        assert_eq!(result.message.as_deref(), Some("No suitable agent found"));
    }

    #[test]
    fn payload_fields_flatten_into_serialized_form() {
        let result = TaskResult::success()
            .with("framework", json!("flask"))
            .with_timestamp();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["framework"], "flask");
        assert!(json["timestamp"].is_string());
        assert!(json.get("message").is_none());
    }
}
