//! # Taskhub Configuration System
//!
//! Layered configuration shared by the gateway, the task service and the
//! dictionary service.
//!
//! ## Sources (lowest to highest precedence)
//!
//! - Built-in defaults ([`TaskhubConfig::default`])
//! - `config/default.toml`
//! - `config/{environment}.toml`
//! - `TASKHUB__*` environment variables, `__` separating nested keys
//!   (`TASKHUB__BROKER__BOOTSTRAP_SERVERS=kafka:9092`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskhub::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//! let dict_url = &manager.config().gateway.dict_service_url;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::topics;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TaskhubConfig {
    pub gateway: GatewayConfig,
    pub task_service: ServiceConfig,
    pub dict_service: ServiceConfig,
    pub broker: BrokerConfig,
    pub logging: LoggingConfig,
}

impl Default for TaskhubConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            task_service: ServiceConfig::listening_on("0.0.0.0:8002"),
            dict_service: ServiceConfig::listening_on("0.0.0.0:8001"),
            broker: BrokerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// API gateway settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub bind_address: String,
    /// Base URL the `/dict/` prefix is rewritten to
    pub dict_service_url: String,
    /// Base URL the `/tasks/` prefix is rewritten to. Includes the task
    /// service's own `/tasks` path so `/tasks/{id}` lands on `/tasks/{id}`.
    pub task_service_url: String,
    /// Timeout for a single forwarded call
    pub backend_timeout_ms: u64,
    /// Timeout for a whole inbound request
    pub request_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            dict_service_url: "http://localhost:8001".to_string(),
            task_service_url: "http://localhost:8002/tasks".to_string(),
            backend_timeout_ms: 30_000,
            request_timeout_ms: 60_000,
        }
    }
}

impl GatewayConfig {
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_millis(self.backend_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Listener settings for a backend service
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_address: String,
    pub request_timeout_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl ServiceConfig {
    pub fn listening_on(bind_address: impl Into<String>) -> Self {
        Self {
            bind_address: bind_address.into(),
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Broker implementation used by the event publisher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerBackend {
    Kafka,
    Memory,
}

/// Message broker settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub backend: BrokerBackend,
    /// Comma separated `host:port` list
    pub bootstrap_servers: String,
    pub task_topic: String,
    pub task_events_topic: String,
    /// Total send attempts per envelope, including the first
    pub retries: u32,
    pub retry_backoff_ms: u64,
    pub ack_timeout_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            backend: BrokerBackend::Kafka,
            bootstrap_servers: "localhost:9092".to_string(),
            task_topic: topics::TASKS.to_string(),
            task_events_topic: topics::TASK_EVENTS.to_string(),
            retries: 3,
            retry_backoff_ms: 500,
            ack_timeout_ms: 5_000,
        }
    }
}

impl BrokerConfig {
    pub fn hosts(&self) -> Vec<String> {
        self.bootstrap_servers
            .split(',')
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    pub fn ack_timeout(&self) -> Duration {
        Duration::from_millis(self.ack_timeout_ms)
    }
}

/// Logging settings; `RUST_LOG` still wins over `level` when set
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    /// Directory for JSON log files; console only when unset
    pub directory: Option<String>,
}

impl TaskhubConfig {
    /// Validate the merged configuration
    pub fn validate(&self) -> ConfigResult<()> {
        require_non_empty("gateway.bind_address", &self.gateway.bind_address)?;
        require_http_url("gateway.dict_service_url", &self.gateway.dict_service_url)?;
        require_http_url("gateway.task_service_url", &self.gateway.task_service_url)?;
        require_non_empty("task_service.bind_address", &self.task_service.bind_address)?;
        require_non_empty("dict_service.bind_address", &self.dict_service.bind_address)?;
        require_non_empty("broker.task_topic", &self.broker.task_topic)?;
        require_non_empty("broker.task_events_topic", &self.broker.task_events_topic)?;

        if self.broker.backend == BrokerBackend::Kafka && self.broker.hosts().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "broker.bootstrap_servers",
                "kafka broker backend",
            ));
        }
        if self.broker.retries == 0 {
            return Err(ConfigurationError::invalid_value(
                "broker.retries",
                "0",
                "at least one send attempt is required",
            ));
        }

        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigurationError::missing_required_field(
            field,
            "taskhub configuration",
        ));
    }
    Ok(())
}

fn require_http_url(field: &str, value: &str) -> ConfigResult<()> {
    require_non_empty(field, value)?;
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigurationError::invalid_value(
            field,
            value,
            "backend URLs must use http:// or https://",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TaskhubConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.broker.task_topic, "tasks");
        assert_eq!(config.broker.task_events_topic, "task_events");
        assert_eq!(config.broker.retries, 3);
    }

    #[test]
    fn test_bootstrap_server_list_parsing() {
        let broker = BrokerConfig {
            bootstrap_servers: "kafka-1:9092, kafka-2:9092,,".to_string(),
            ..BrokerConfig::default()
        };
        assert_eq!(broker.hosts(), vec!["kafka-1:9092", "kafka-2:9092"]);
    }

    #[test]
    fn test_rejects_non_http_backend_url() {
        let mut config = TaskhubConfig::default();
        config.gateway.dict_service_url = "dict-service:8001".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gateway.dict_service_url"));
    }

    #[test]
    fn test_memory_backend_needs_no_bootstrap_servers() {
        let mut config = TaskhubConfig::default();
        config.broker.backend = BrokerBackend::Memory;
        config.broker.bootstrap_servers = String::new();
        assert!(config.validate().is_ok());

        config.broker.backend = BrokerBackend::Kafka;
        assert!(config.validate().is_err());
    }
}
