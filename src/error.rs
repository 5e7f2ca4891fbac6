//! # Crate Error Types
//!
//! Domain-level errors shared by the stores, the task service, the event
//! publisher and the gateway forwarder. The web layer maps each variant to an
//! HTTP status in [`crate::web::response_types`].

use thiserror::Error;

use crate::config::ConfigurationError;
use crate::events::PublishError;

#[derive(Debug, Error)]
pub enum TaskhubError {
    /// The requested record does not exist
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// Request body could not be decoded as UTF-8 JSON
    #[error("Invalid JSON in request: {reason}")]
    InvalidPayload { reason: String },

    /// Transport failure while talking to a backend service
    #[error("Service unavailable: {reason}")]
    BackendUnavailable { reason: String },

    /// Backend answered with a body that is not JSON
    #[error("Invalid response from backend: {reason}")]
    InvalidBackendResponse { reason: String },

    /// The outbound HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Event publish failed: {0}")]
    Publish(#[from] PublishError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl TaskhubError {
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Task",
            id: id.into(),
        }
    }

    pub fn item_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "Item",
            id: id.into(),
        }
    }

    pub fn invalid_payload(reason: impl std::fmt::Display) -> Self {
        Self::InvalidPayload {
            reason: reason.to_string(),
        }
    }

    pub fn backend_unavailable(reason: impl std::fmt::Display) -> Self {
        Self::BackendUnavailable {
            reason: reason.to_string(),
        }
    }

    pub fn invalid_backend_response(reason: impl std::fmt::Display) -> Self {
        Self::InvalidBackendResponse {
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskhubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_messages() {
        assert_eq!(TaskhubError::task_not_found("abc").to_string(), "Task not found");
        assert_eq!(TaskhubError::item_not_found("abc").to_string(), "Item not found");
    }

    #[test]
    fn test_backend_unavailable_embeds_reason() {
        let err = TaskhubError::backend_unavailable("connection refused");
        assert_eq!(err.to_string(), "Service unavailable: connection refused");
    }
}
