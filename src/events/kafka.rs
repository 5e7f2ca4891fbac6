//! # Kafka Connector
//!
//! Kafka transport built on the pure-Rust `kafka` producer. The producer's
//! `send` waits for the partition leader's acknowledgement, so every send is
//! already flushed when it returns. Failed sends are retried a bounded number
//! of times with a fixed backoff; that retry is a transport concern and the
//! application never re-publishes on its own.

use async_trait::async_trait;
use kafka::producer::{Producer, Record, RequiredAcks};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::broker::{BrokerClient, BrokerConnector};
use super::publisher::PublishError;
use crate::config::BrokerConfig;

const CLIENT_ID: &str = "taskhub-task-service";

#[derive(Debug, Clone)]
pub struct KafkaConnector {
    hosts: Vec<String>,
    attempts: u32,
    retry_backoff: Duration,
    ack_timeout: Duration,
}

impl KafkaConnector {
    pub fn new(config: &BrokerConfig) -> Self {
        Self {
            hosts: config.hosts(),
            attempts: config.retries.max(1),
            retry_backoff: config.retry_backoff(),
            ack_timeout: config.ack_timeout(),
        }
    }
}

#[async_trait]
impl BrokerConnector for KafkaConnector {
    async fn connect(&self) -> Result<Arc<dyn BrokerClient>, PublishError> {
        let hosts = self.hosts.clone();
        let ack_timeout = self.ack_timeout;

        info!(hosts = ?hosts, "Connecting Kafka producer");

        let producer = tokio::task::spawn_blocking(move || {
            Producer::from_hosts(hosts)
                .with_client_id(CLIENT_ID.to_string())
                .with_ack_timeout(ack_timeout)
                .with_required_acks(RequiredAcks::One)
                .create()
        })
        .await
        .map_err(|e| PublishError::Connection(e.to_string()))?
        .map_err(|e| PublishError::Connection(e.to_string()))?;

        Ok(Arc::new(KafkaBrokerClient {
            producer: Arc::new(Mutex::new(producer)),
            attempts: self.attempts,
            retry_backoff: self.retry_backoff,
        }))
    }

    fn describe(&self) -> String {
        format!("kafka://{}", self.hosts.join(","))
    }
}

struct KafkaBrokerClient {
    producer: Arc<Mutex<Producer>>,
    attempts: u32,
    retry_backoff: Duration,
}

impl KafkaBrokerClient {
    async fn send_once(&self, topic: &str, payload: &[u8]) -> Result<(), String> {
        let producer = Arc::clone(&self.producer);
        let topic = topic.to_string();
        let payload = payload.to_vec();

        tokio::task::spawn_blocking(move || {
            producer
                .lock()
                .send(&Record::from_value(&topic, payload.as_slice()))
                .map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    }
}

#[async_trait]
impl BrokerClient for KafkaBrokerClient {
    async fn send(&self, topic: &str, payload: Vec<u8>) -> Result<(), PublishError> {
        let mut attempt = 1;
        loop {
            match self.send_once(topic, &payload).await {
                Ok(()) => return Ok(()),
                Err(reason) if attempt < self.attempts => {
                    warn!(
                        topic = %topic,
                        attempt = attempt,
                        max_attempts = self.attempts,
                        error = %reason,
                        "Kafka send failed, retrying"
                    );
                    attempt += 1;
                    tokio::time::sleep(self.retry_backoff).await;
                }
                Err(reason) => {
                    return Err(PublishError::Send {
                        topic: topic.to_string(),
                        reason,
                    })
                }
            }
        }
    }

    /// Sends are acknowledged synchronously; nothing is buffered here
    async fn flush(&self) -> Result<(), PublishError> {
        Ok(())
    }
}
