//! # Web API Error Types
//!
//! Defines error types specific to the web API and their HTTP response conversions.
//! Every error body is JSON: `{"detail": <message>, "code": <CODE>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::error::TaskhubError;

/// Web API specific errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    UnprocessableEntity { message: String },

    #[error("{message}")]
    ServiceUnavailable { message: String },

    #[error("{message}")]
    BadGateway { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::UnprocessableEntity {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::UnprocessableEntity { .. } => "UNPROCESSABLE_ENTITY",
            ApiError::ServiceUnavailable { .. } => "SERVICE_UNAVAILABLE",
            ApiError::BadGateway { .. } => "BAD_GATEWAY",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_response = json!({
            "detail": self.to_string(),
            "code": self.error_code(),
        });

        (self.status_code(), Json(error_response)).into_response()
    }
}

/// Convert domain errors to API errors
impl From<TaskhubError> for ApiError {
    fn from(err: TaskhubError) -> Self {
        let message = err.to_string();
        match err {
            TaskhubError::NotFound { .. } => ApiError::NotFound { message },
            TaskhubError::InvalidPayload { .. } => ApiError::BadRequest { message },
            TaskhubError::BackendUnavailable { .. } => ApiError::ServiceUnavailable { message },
            TaskhubError::InvalidBackendResponse { .. } => ApiError::BadGateway { message },
            TaskhubError::HttpClient(_)
            | TaskhubError::Publish(_)
            | TaskhubError::Configuration(_) => ApiError::Internal { message },
        }
    }
}

/// Acknowledgement returned by delete and complete endpoints
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

impl ActionResponse {
    pub fn for_task(message: impl Into<String>, task_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            task_id: Some(task_id.into()),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            task_id: None,
        }
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (TaskhubError::task_not_found("x"), StatusCode::NOT_FOUND),
            (TaskhubError::invalid_payload("eof"), StatusCode::BAD_REQUEST),
            (
                TaskhubError::backend_unavailable("refused"),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                TaskhubError::invalid_backend_response("html"),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_not_found_detail() {
        let err = ApiError::from(TaskhubError::task_not_found("x"));
        assert_eq!(err.to_string(), "Task not found");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
