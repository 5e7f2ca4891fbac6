//! # Web API Application State
//!
//! Shared state for the three HTTP surfaces. Each state is built once at
//! startup and cloned cheaply into every request handler.

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::{GatewayConfig, TaskhubConfig};
use crate::error::Result;
use crate::events::EventPublisher;
use crate::gateway::Forwarder;
use crate::services::TaskService;
use crate::store::ItemStore;

/// Gateway state: backend URLs and the outbound HTTP client
#[derive(Debug, Clone)]
pub struct GatewayState {
    pub config: Arc<GatewayConfig>,
    pub forwarder: Forwarder,
}

impl GatewayState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let forwarder = Forwarder::new(config.backend_timeout())?;

        info!(
            dict_service_url = %config.dict_service_url,
            task_service_url = %config.task_service_url,
            backend_timeout_ms = config.backend_timeout_ms,
            "Gateway state created"
        );

        Ok(Self {
            config: Arc::new(config),
            forwarder,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        self.config.request_timeout()
    }
}

/// Task service state
#[derive(Debug, Clone)]
pub struct TaskServiceState {
    pub service: Arc<TaskService>,
    pub request_timeout: Duration,
}

impl TaskServiceState {
    pub fn new(service: Arc<TaskService>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// Build the publisher and service for the configured broker
    pub fn from_config(config: &TaskhubConfig) -> Self {
        let publisher = Arc::new(EventPublisher::from_config(&config.broker));

        info!(
            broker = %publisher.broker(),
            task_topic = %config.broker.task_topic,
            task_events_topic = %config.broker.task_events_topic,
            "Task service state created"
        );

        Self::new(
            Arc::new(TaskService::new(publisher, &config.broker)),
            config.task_service.request_timeout(),
        )
    }
}

/// Dictionary service state
#[derive(Debug, Clone)]
pub struct DictServiceState {
    pub items: Arc<ItemStore>,
    pub request_timeout: Duration,
}

impl DictServiceState {
    pub fn new(request_timeout: Duration) -> Self {
        Self {
            items: Arc::new(ItemStore::new()),
            request_timeout,
        }
    }
}
