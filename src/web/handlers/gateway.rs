//! # Gateway Handlers
//!
//! Prefix forwarding plus the gateway's own informational endpoints.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, Uri};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::{json, Value};
use tracing::debug;

use crate::constants::services;
use crate::gateway::{ForwardRequest, ForwardRoute};
use crate::web::response_types::ApiError;
use crate::web::state::GatewayState;

/// Forward `/dict/*` to the dictionary service
pub async fn proxy_dict(
    State(state): State<GatewayState>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let base_url = state.config.dict_service_url.clone();
    proxy(state, ForwardRoute::Dict, &base_url, method, uri, query, headers, body).await
}

/// Forward `/tasks/*` to the task service
pub async fn proxy_tasks(
    State(state): State<GatewayState>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let base_url = state.config.task_service_url.clone();
    proxy(state, ForwardRoute::Tasks, &base_url, method, uri, query, headers, body).await
}

#[allow(clippy::too_many_arguments)]
async fn proxy(
    state: GatewayState,
    route: ForwardRoute,
    base_url: &str,
    method: Method,
    uri: Uri,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    debug!(route = route.name(), method = %method, path = uri.path(), "Gateway request");

    let request = ForwardRequest::new(route, method, uri.path(), query, headers, body);
    match state.forwarder.forward(route, base_url, request).await {
        Ok(forwarded) => {
            (forwarded.status, forwarded.headers, Json(forwarded.body)).into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Gateway liveness
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": services::GATEWAY,
    }))
}

/// Backend wiring and exposed endpoints
pub async fn debug_info(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "service": services::GATEWAY,
        "dict_service": state.config.dict_service_url,
        "task_service": state.config.task_service_url,
        "endpoints": endpoint_table(),
    }))
}

/// Route table for the gateway surface
pub async fn docs() -> Json<Value> {
    Json(json!({
        "service": services::GATEWAY,
        "routes": endpoint_table(),
    }))
}

pub async fn root() -> Redirect {
    Redirect::temporary("/docs")
}

fn endpoint_table() -> Value {
    json!([
        { "path": "/dict/{path}", "methods": ["GET", "POST", "PUT", "DELETE", "OPTIONS"], "backend": services::DICT_SERVICE },
        { "path": "/tasks/{path}", "methods": ["GET", "POST", "PUT", "DELETE", "OPTIONS"], "backend": services::TASK_SERVICE },
        { "path": "/health", "methods": ["GET"] },
        { "path": "/debug", "methods": ["GET"] },
        { "path": "/docs", "methods": ["GET"] },
    ])
}
