//! # System Constants
//!
//! Topic names, event types, task statuses and header values shared by the
//! gateway and the backend services.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default broker topics
pub mod topics {
    /// Receives `task_created` envelopes only
    pub const TASKS: &str = "tasks";
    /// Receives every other task lifecycle envelope
    pub const TASK_EVENTS: &str = "task_events";
}

/// Task status values assigned by the service itself. Any other string may
/// be set through a general update.
pub mod status {
    pub const PENDING: &str = "pending";
    pub const COMPLETED: &str = "completed";
}

pub const DEFAULT_PRIORITY: &str = "medium";

/// CORS values attached by the gateway
pub mod cors {
    pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
    pub const ALLOW_ANY: &str = "*";
}

/// Service names reported by health and debug endpoints
pub mod services {
    pub const GATEWAY: &str = "api-gateway";
    pub const TASK_SERVICE: &str = "task-service";
    pub const DICT_SERVICE: &str = "dict-service";
}

/// Task lifecycle event types carried in the envelope's `event_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskEventType {
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    TaskCompleted,
}

impl TaskEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskEventType::TaskCreated => "task_created",
            TaskEventType::TaskUpdated => "task_updated",
            TaskEventType::TaskDeleted => "task_deleted",
            TaskEventType::TaskCompleted => "task_completed",
        }
    }
}

impl fmt::Display for TaskEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serialization_matches_display() {
        for event_type in [
            TaskEventType::TaskCreated,
            TaskEventType::TaskUpdated,
            TaskEventType::TaskDeleted,
            TaskEventType::TaskCompleted,
        ] {
            let json = serde_json::to_value(event_type).unwrap();
            assert_eq!(json, serde_json::Value::String(event_type.to_string()));
        }
    }
}
