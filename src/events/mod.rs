//! # Task Lifecycle Events
//!
//! Envelope format, broker abstractions and the event publisher used by the
//! task service.
//!
//! ## Components
//!
//! - [`envelope`] - `{event_type, event_time, data}` wire format
//! - [`broker`] - connector/client traits and the in-process broker
//! - [`kafka`] - Kafka connector with bounded transport-level retry
//! - [`publisher`] - lazily connected publisher that flushes every send

pub mod broker;
pub mod envelope;
pub mod kafka;
pub mod publisher;

pub use broker::{BrokerClient, BrokerConnector, InMemoryBroker, RecordedEvent};
pub use envelope::EventEnvelope;
pub use kafka::KafkaConnector;
pub use publisher::{EventPublisher, PublishError};
