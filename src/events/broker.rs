//! # Broker Abstractions
//!
//! A [`BrokerConnector`] opens the connection; the resulting
//! [`BrokerClient`] is shared by every publish for the life of the process.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::debug;

use super::publisher::PublishError;

/// An established broker connection
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Send one payload to `topic`
    async fn send(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError>;

    /// Block until every sent payload has been acknowledged
    async fn flush(&self) -> Result<(), PublishError>;
}

/// Opens broker connections
#[async_trait]
pub trait BrokerConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn BrokerClient>, PublishError>;

    /// Human readable target for logs and health output
    fn describe(&self) -> String;
}

/// Envelope captured by the in-process broker
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub topic: String,
    pub payload: Value,
}

#[derive(Debug, Default)]
struct InMemoryBrokerState {
    events: Mutex<Vec<RecordedEvent>>,
    connects: AtomicUsize,
    fail_connect: AtomicBool,
    fail_sends: AtomicBool,
}

/// In-process broker for local development and tests
///
/// Clones share the same recorded events.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBroker {
    state: Arc<InMemoryBrokerState>,
}

impl InMemoryBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded envelope in publish order
    pub fn published(&self) -> Vec<RecordedEvent> {
        self.state.events.lock().clone()
    }

    /// Recorded envelopes for a single topic
    pub fn published_on(&self, topic: &str) -> Vec<Value> {
        self.state
            .events
            .lock()
            .iter()
            .filter(|event| event.topic == topic)
            .map(|event| event.payload.clone())
            .collect()
    }

    /// Number of connections opened so far
    pub fn connect_count(&self) -> usize {
        self.state.connects.load(Ordering::SeqCst)
    }

    pub fn set_fail_connect(&self, fail: bool) {
        self.state.fail_connect.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.state.fail_sends.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl BrokerConnector for InMemoryBroker {
    async fn connect(&self) -> Result<Arc<dyn BrokerClient>, PublishError> {
        // Widens the window for concurrent first use
        tokio::task::yield_now().await;

        if self.state.fail_connect.load(Ordering::SeqCst) {
            return Err(PublishError::Connection(
                "in-memory broker refused connection".to_string(),
            ));
        }

        self.state.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(self.clone()))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[async_trait]
impl BrokerClient for InMemoryBroker {
    async fn send(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        if self.state.fail_sends.load(Ordering::SeqCst) {
            return Err(PublishError::Send {
                topic: topic.to_string(),
                reason: "in-memory broker rejected the message".to_string(),
            });
        }

        let payload: Value = serde_json::from_slice(&payload)?;
        debug!(topic = %topic, "Recording event in memory broker");
        self.state.events.lock().push(RecordedEvent {
            topic: topic.to_string(),
            payload,
        });
        Ok(())
    }

    async fn flush(&self) -> Result<(), PublishError> {
        Ok(())
    }
}
