//! # Task Service
//!
//! Orchestrates task store mutations and lifecycle event publication.
//!
//! Every mutation is applied to the store first and published second. When
//! publishing fails the mutation is kept and the error is returned to the
//! caller, so a client may see a failure for a change that did take effect
//! and the matching event is lost. Nothing is rolled back or queued.
//!
//! Mutations hold `publish_order` from the store write through the publish,
//! so events leave in the same order the store applied them.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::BrokerConfig;
use crate::constants::TaskEventType;
use crate::error::{Result, TaskhubError};
use crate::events::EventPublisher;
use crate::logging::{log_error, log_task_operation};
use crate::models::{NewTask, Task, TaskFilter, TaskStatusView, TaskUpdate};
use crate::store::TaskStore;

#[derive(Debug)]
pub struct TaskService {
    store: TaskStore,
    publish_order: Mutex<()>,
    publisher: Arc<EventPublisher>,
    task_topic: String,
    task_events_topic: String,
}

impl TaskService {
    pub fn new(publisher: Arc<EventPublisher>, config: &BrokerConfig) -> Self {
        Self {
            store: TaskStore::new(),
            publish_order: Mutex::new(()),
            publisher,
            task_topic: config.task_topic.clone(),
            task_events_topic: config.task_events_topic.clone(),
        }
    }

    pub fn publisher(&self) -> &EventPublisher {
        &self.publisher
    }

    pub fn task_topic(&self) -> &str {
        &self.task_topic
    }

    /// Create a pending task, publish `task_created` and kick off
    /// post-processing in the background
    pub async fn create(&self, request: NewTask) -> Result<Task> {
        let _order = self.publish_order.lock().await;
        let task = self.store.insert(Task::new(request, chrono::Utc::now()));
        log_task_operation("create", &task.id, &task.status, Some(&task.title));

        self.publish(&self.task_topic, TaskEventType::TaskCreated, &task)
            .await?;

        spawn_post_processing(task.clone());
        Ok(task)
    }

    pub fn list(&self, filter: &TaskFilter) -> Vec<Task> {
        self.store.list(filter)
    }

    pub fn get(&self, id: &str) -> Result<Task> {
        self.store
            .get(id)
            .ok_or_else(|| TaskhubError::task_not_found(id))
    }

    pub async fn update(&self, id: &str, update: TaskUpdate) -> Result<Task> {
        let _order = self.publish_order.lock().await;
        let task = self
            .store
            .update(id, update)
            .ok_or_else(|| TaskhubError::task_not_found(id))?;
        log_task_operation("update", &task.id, &task.status, None);

        self.publish(&self.task_events_topic, TaskEventType::TaskUpdated, &task)
            .await?;
        Ok(task)
    }

    /// Remove the task and publish its last known state
    pub async fn delete(&self, id: &str) -> Result<Task> {
        let _order = self.publish_order.lock().await;
        let task = self
            .store
            .remove(id)
            .ok_or_else(|| TaskhubError::task_not_found(id))?;
        log_task_operation("delete", &task.id, &task.status, None);

        self.publish(&self.task_events_topic, TaskEventType::TaskDeleted, &task)
            .await?;
        Ok(task)
    }

    /// Mark the task completed; repeated calls succeed and publish again
    pub async fn complete(&self, id: &str) -> Result<Task> {
        let _order = self.publish_order.lock().await;
        let task = self
            .store
            .complete(id)
            .ok_or_else(|| TaskhubError::task_not_found(id))?;
        log_task_operation("complete", &task.id, &task.status, None);

        self.publish(&self.task_events_topic, TaskEventType::TaskCompleted, &task)
            .await?;
        Ok(task)
    }

    pub fn get_status(&self, id: &str) -> Result<TaskStatusView> {
        self.get(id).map(|task| task.status_view())
    }

    pub fn total(&self) -> usize {
        self.store.len()
    }

    pub fn recent(&self, limit: usize) -> Vec<Task> {
        self.store.head(limit)
    }

    async fn publish(&self, topic: &str, event_type: TaskEventType, task: &Task) -> Result<()> {
        if let Err(e) = self.publisher.publish(topic, event_type, task).await {
            log_error(
                "task_service",
                event_type.as_str(),
                &e.to_string(),
                Some(&task.id),
            );
            return Err(e.into());
        }
        Ok(())
    }
}

/// Best-effort simulated work after creation; failures are only logged and
/// never reach the caller
fn spawn_post_processing(task: Task) {
    tokio::spawn(async move {
        info!(task_id = %task.id, title = %task.title, "[PROCESSING] Task");
        info!(task_id = %task.id, "[COMPLETED] Task processed");
    });
}
