//! # Web API Route Definitions
//!
//! HTTP route tables for the gateway, task service and dictionary service.

use axum::extract::DefaultBodyLimit;
use axum::handler::Handler;
use axum::routing::{get, put, MethodRouter};
use axum::Router;

use crate::web::handlers;
use crate::web::state::{DictServiceState, GatewayState, TaskServiceState};

/// Route a handler on every forwarded method; forwarded bodies are not
/// size-limited
fn forwarded<H, T>(handler: H) -> MethodRouter<GatewayState>
where
    H: Handler<T, GatewayState>,
    T: 'static,
{
    get(handler.clone())
        .post(handler.clone())
        .put(handler.clone())
        .delete(handler.clone())
        .options(handler)
        .layer(DefaultBodyLimit::disable())
}

/// Gateway routes
///
/// `/dict/*` and `/tasks/*` are forwarded to their backends; the bare
/// prefixes are registered separately since a wildcard needs a segment.
pub fn gateway_routes() -> Router<GatewayState> {
    Router::new()
        .route("/", get(handlers::gateway::root))
        .route("/health", get(handlers::gateway::health))
        .route("/debug", get(handlers::gateway::debug_info))
        .route("/docs", get(handlers::gateway::docs))
        .route("/dict/", forwarded(handlers::gateway::proxy_dict))
        .route("/dict/*path", forwarded(handlers::gateway::proxy_dict))
        .route("/tasks/", forwarded(handlers::gateway::proxy_tasks))
        .route("/tasks/*path", forwarded(handlers::gateway::proxy_tasks))
}

/// Task service routes
///
/// `/tasks` and `/tasks/` share handlers.
pub fn task_routes() -> Router<TaskServiceState> {
    let collection = get(handlers::tasks::list_tasks).post(handlers::tasks::create_task);

    Router::new()
        .route("/tasks", collection.clone())
        .route("/tasks/", collection)
        .route(
            "/tasks/:task_id",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route(
            "/tasks/:task_id/status",
            get(handlers::tasks::get_task_status),
        )
        .route(
            "/tasks/:task_id/complete",
            put(handlers::tasks::complete_task),
        )
        .route("/health", get(handlers::health::task_service_health))
        .route("/debug", get(handlers::tasks::debug_info))
}

/// Dictionary service routes
pub fn dict_routes() -> Router<DictServiceState> {
    let collection = get(handlers::items::list_items).post(handlers::items::create_item);

    Router::new()
        .route("/items", collection.clone())
        .route("/items/", collection)
        .route(
            "/items/:item_id",
            get(handlers::items::get_item)
                .put(handlers::items::update_item)
                .delete(handlers::items::delete_item),
        )
        .route("/health", get(handlers::health::dict_service_health))
}
