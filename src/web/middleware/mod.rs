//! # Web API Middleware
//!
//! Middleware stack shared by every HTTP surface: request ids, request
//! timeout and request tracing.

pub mod cors;
pub mod request_id;

use axum::middleware;
use axum::Router;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Apply the middleware stack to a router
///
/// Layer order, outermost first:
/// 1. Request tracing
/// 2. Request timeout (`408` when exceeded)
/// 3. Request ID generation
pub fn apply_middleware_stack<S>(router: Router<S>, request_timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(middleware::from_fn(request_id::add_request_id))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
