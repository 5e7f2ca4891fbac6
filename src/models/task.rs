//! # Task Model
//!
//! A task record plus the create/update request shapes accepted by the task
//! service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{status, DEFAULT_PRIORITY};

/// Task record as stored and as embedded in event envelopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a pending task with a fresh id; `created_at == updated_at`
    pub fn new(request: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            description: request.description,
            priority: request.priority,
            status: status::PENDING.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the present fields of `update` and refresh `updated_at`
    ///
    /// `updated_at` is refreshed even when no field is present.
    pub fn apply(&mut self, update: TaskUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.touch(now);
    }

    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.status = status::COMPLETED.to_string();
        self.touch(now);
    }

    pub fn status_view(&self) -> TaskStatusView {
        TaskStatusView {
            task_id: self.id.clone(),
            status: self.status.clone(),
            updated_at: self.updated_at,
        }
    }

    /// Never moves `updated_at` behind `created_at` or backwards on clock skew
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.updated_at);
    }
}

/// Body of `POST /tasks/`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    DEFAULT_PRIORITY.to_string()
}

/// Body of `PUT /tasks/{id}`; `None` (absent or null) leaves a field unchanged
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Exact-match list filter; both fields AND-ed when present
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        fn field_matches(filter: &Option<String>, value: &str) -> bool {
            match filter.as_deref() {
                None | Some("") => true,
                Some(expected) => expected == value,
            }
        }

        field_matches(&self.status, &task.status) && field_matches(&self.priority, &task.priority)
    }
}

/// Response of `GET /tasks/{id}/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusView {
    pub task_id: String,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample(now: DateTime<Utc>) -> Task {
        Task::new(
            NewTask {
                title: "T".to_string(),
                description: "D".to_string(),
                priority: default_priority(),
            },
            now,
        )
    }

    #[test]
    fn test_new_task_defaults() {
        let now = Utc::now();
        let task = sample(now);
        assert_eq!(task.status, "pending");
        assert_eq!(task.priority, "medium");
        assert_eq!(task.created_at, task.updated_at);
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn test_priority_defaults_when_absent() {
        let request: NewTask =
            serde_json::from_str(r#"{"title":"T","description":"D"}"#).unwrap();
        assert_eq!(request.priority, "medium");
    }

    #[test]
    fn test_apply_only_overwrites_present_fields() {
        let now = Utc::now();
        let mut task = sample(now);
        let later = now + Duration::seconds(5);

        let update: TaskUpdate =
            serde_json::from_str(r#"{"status":"in_progress","title":null}"#).unwrap();
        task.apply(update, later);

        assert_eq!(task.status, "in_progress");
        assert_eq!(task.title, "T");
        assert_eq!(task.description, "D");
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn test_empty_update_still_refreshes_timestamp() {
        let now = Utc::now();
        let mut task = sample(now);
        let later = now + Duration::milliseconds(10);
        task.apply(TaskUpdate::default(), later);
        assert_eq!(task.updated_at, later);
    }

    #[test]
    fn test_touch_never_goes_backwards() {
        let now = Utc::now();
        let mut task = sample(now);
        task.mark_completed(now - Duration::seconds(30));
        assert_eq!(task.status, "completed");
        assert!(task.updated_at >= task.created_at);
    }

    #[test]
    fn test_filter_matching() {
        let mut task = sample(Utc::now());
        task.priority = "high".to_string();

        let by_status = TaskFilter {
            status: Some("pending".to_string()),
            priority: None,
        };
        let both = TaskFilter {
            status: Some("pending".to_string()),
            priority: Some("low".to_string()),
        };
        let blank = TaskFilter {
            status: Some(String::new()),
            priority: None,
        };

        assert!(by_status.matches(&task));
        assert!(!both.matches(&task));
        assert!(blank.matches(&task));
    }
}
