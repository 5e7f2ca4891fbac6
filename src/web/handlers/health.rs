//! # Health Check Handlers
//!
//! Health endpoints for the task and dictionary services. The gateway's own
//! health check lives with the gateway handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::constants::services;
use crate::web::state::{DictServiceState, TaskServiceState};

const BROKER_CHECK_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ERROR_CHARS: usize = 100;

/// Task service health; `degraded` when the broker cannot be reached
#[derive(Debug, Serialize)]
pub struct TaskServiceHealth {
    pub status: &'static str,
    pub kafka: &'static str,
    pub total_tasks: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DictServiceHealth {
    pub status: &'static str,
    pub service: &'static str,
    pub total_items: usize,
}

/// Task service health: GET /health
///
/// Always answers `200`; broker trouble is reported in the body.
pub async fn task_service_health(State(state): State<TaskServiceState>) -> Json<TaskServiceHealth> {
    let total_tasks = state.service.total();

    let check = timeout(
        BROKER_CHECK_TIMEOUT,
        state.service.publisher().ensure_connected(),
    )
    .await;

    let failure = match check {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!(
            "Broker connection timed out after {}s",
            BROKER_CHECK_TIMEOUT.as_secs()
        )),
    };

    let health = match failure {
        None => {
            debug!(total_tasks, "Task service healthy");
            TaskServiceHealth {
                status: "healthy",
                kafka: "connected",
                total_tasks,
                service: Some(services::TASK_SERVICE),
                error: None,
            }
        }
        Some(error) => {
            warn!(error = %error, "Task service degraded");
            TaskServiceHealth {
                status: "degraded",
                kafka: "disconnected",
                total_tasks,
                service: None,
                error: Some(truncate_chars(&error, MAX_ERROR_CHARS)),
            }
        }
    };

    Json(health)
}

/// Dictionary service health: GET /health
pub async fn dict_service_health(State(state): State<DictServiceState>) -> Json<DictServiceHealth> {
    Json(DictServiceHealth {
        status: "healthy",
        service: services::DICT_SERVICE,
        total_items: state.items.len(),
    })
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
