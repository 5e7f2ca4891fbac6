//! # Event Envelope

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::TaskEventType;
use crate::models::Task;

/// Wrapper published to the broker around a task snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_type: TaskEventType,
    pub event_time: DateTime<Utc>,
    pub data: Task,
}

impl EventEnvelope {
    pub fn new(event_type: TaskEventType, data: Task) -> Self {
        Self {
            event_type,
            event_time: Utc::now(),
            data,
        }
    }
}
