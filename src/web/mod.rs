//! # Web API Module
//!
//! Axum applications for the three services.
//!
//! ## Core Components
//!
//! - [`routes`] - HTTP route tables per service
//! - [`handlers`] - Request handlers for each endpoint group
//! - [`middleware`] - Request ids, timeouts and tracing, plus task route CORS
//! - [`state`] - Shared application state
//! - [`response_types`] - Error bodies and acknowledgements
//! - [`extractors`] - JSON body extraction with `422` rejections

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response_types;
pub mod routes;
pub mod state;

use axum::Router;
use tracing::info;

use state::{DictServiceState, GatewayState, TaskServiceState};

/// Create the gateway application
///
/// The task route CORS layer sits outside the shared stack so timeouts and
/// body rejections on `/tasks/` carry the headers too.
pub fn create_gateway_app(state: GatewayState) -> Router {
    let request_timeout = state.request_timeout();
    middleware::apply_middleware_stack(routes::gateway_routes(), request_timeout)
        .layer(axum::middleware::from_fn(
            middleware::cors::add_task_route_cors,
        ))
        .with_state(state)
}

/// Create the task service application
pub fn create_task_service_app(state: TaskServiceState) -> Router {
    let request_timeout = state.request_timeout;
    middleware::apply_middleware_stack(routes::task_routes(), request_timeout).with_state(state)
}

/// Create the dictionary service application
pub fn create_dict_service_app(state: DictServiceState) -> Router {
    let request_timeout = state.request_timeout;
    middleware::apply_middleware_stack(routes::dict_routes(), request_timeout).with_state(state)
}

/// Resolves on Ctrl+C (and SIGTERM on unix)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
