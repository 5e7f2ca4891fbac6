#![allow(clippy::doc_markdown)] // Allow technical terms like Kafka, JSON in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Taskhub
//!
//! A small HTTP microservice system: an API gateway, a dictionary service and
//! a task service that publishes task lifecycle events to Kafka.
//!
//! ## Architecture
//!
//! ```text
//! client ──► gateway ──/dict/*──►  dict service   (in-memory items)
//!                    └─/tasks/*─►  task service   (in-memory tasks)
//!                                       │
//!                                       └──► Kafka: `tasks`, `task_events`
//! ```
//!
//! Each service is its own binary and owns its state for the life of the
//! process. Nothing is persisted.
//!
//! ## Module Organization
//!
//! - [`config`] - Layered configuration for all three services
//! - [`constants`] - Topics, statuses, event types and service names
//! - [`error`] - Structured error handling
//! - [`events`] - Event envelope, broker abstraction and publisher
//! - [`gateway`] - Prefix-based request forwarding
//! - [`logging`] - Structured logging setup
//! - [`models`] - Task and item records
//! - [`services`] - Task operations with event publication
//! - [`store`] - Thread-safe in-memory stores
//! - [`web`] - Axum applications, handlers and middleware
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use taskhub::config::TaskhubConfig;
//! use taskhub::web::{create_task_service_app, state::TaskServiceState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TaskhubConfig::default();
//! let app = create_task_service_app(TaskServiceState::from_config(&config));
//!
//! let listener = tokio::net::TcpListener::bind(&config.task_service.bind_address).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;
pub mod web;

pub use config::{ConfigManager, TaskhubConfig};
pub use constants::TaskEventType;
pub use error::{Result, TaskhubError};
pub use events::{EventEnvelope, EventPublisher, InMemoryBroker, PublishError};
pub use models::{Item, Task};
