//! # Event Publisher
//!
//! Publishes task lifecycle envelopes. The broker connection is opened on
//! first use and reused afterwards; concurrent first publishes share a single
//! connection attempt. Every publish is flushed before it returns.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::broker::{BrokerClient, BrokerConnector, InMemoryBroker};
use super::envelope::EventEnvelope;
use super::kafka::KafkaConnector;
use crate::config::{BrokerBackend, BrokerConfig};
use crate::constants::TaskEventType;
use crate::models::Task;

/// Error types for event publishing
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Broker connection failed: {0}")]
    Connection(String),
    #[error("Failed to send to topic '{topic}': {reason}")]
    Send { topic: String, reason: String },
    #[error("Broker flush failed: {0}")]
    Flush(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub struct EventPublisher {
    connector: Arc<dyn BrokerConnector>,
    client: OnceCell<Arc<dyn BrokerClient>>,
}

impl std::fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventPublisher")
            .field("broker", &self.connector.describe())
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl EventPublisher {
    pub fn new(connector: Arc<dyn BrokerConnector>) -> Self {
        Self {
            connector,
            client: OnceCell::new(),
        }
    }

    /// Build a publisher for the configured broker backend
    pub fn from_config(config: &BrokerConfig) -> Self {
        match config.backend {
            BrokerBackend::Kafka => Self::new(Arc::new(KafkaConnector::new(config))),
            BrokerBackend::Memory => Self::new(Arc::new(InMemoryBroker::new())),
        }
    }

    /// Connect if no connection exists yet and return the shared client
    pub async fn ensure_connected(&self) -> Result<Arc<dyn BrokerClient>, PublishError> {
        self.client
            .get_or_try_init(|| async {
                let client = self.connector.connect().await?;
                info!(broker = %self.connector.describe(), "Broker connection established");
                Ok::<_, PublishError>(client)
            })
            .await
            .cloned()
    }

    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    pub fn broker(&self) -> String {
        self.connector.describe()
    }

    /// Publish one envelope around `snapshot` and wait for the broker ack
    pub async fn publish(
        &self,
        topic: &str,
        event_type: TaskEventType,
        snapshot: &Task,
    ) -> Result<EventEnvelope, PublishError> {
        let client = self.ensure_connected().await?;

        let envelope = EventEnvelope::new(event_type, snapshot.clone());
        let payload = serde_json::to_vec(&envelope)?;

        client.send(topic, payload).await?;
        client.flush().await?;

        debug!(
            topic = %topic,
            event_type = %event_type,
            task_id = %snapshot.id,
            "Published task event"
        );

        Ok(envelope)
    }
}
