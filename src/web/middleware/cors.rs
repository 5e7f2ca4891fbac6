//! # Task Route CORS Middleware
//!
//! Every response under the gateway's `/tasks/` prefix carries the CORS
//! headers, including body-limit rejections and request timeouts produced
//! before or around the forwarding handler.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::constants::cors;
use crate::gateway::ForwardRoute;

pub async fn add_task_route_cors(request: Request, next: Next) -> Response {
    let on_task_route = request
        .uri()
        .path()
        .starts_with(ForwardRoute::Tasks.prefix());

    let mut response = next.run(request).await;

    if on_task_route {
        let headers = response.headers_mut();
        headers.insert(
            "access-control-allow-origin",
            HeaderValue::from_static(cors::ALLOW_ANY),
        );
        headers.insert(
            "access-control-allow-methods",
            HeaderValue::from_static(cors::ALLOW_METHODS),
        );
    }

    response
}
