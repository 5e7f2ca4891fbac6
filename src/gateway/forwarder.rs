//! # Gateway Forwarder
//!
//! Rewrites an inbound request onto a backend base URL, forwards it and
//! translates the backend's answer (or the transport failure) into the
//! gateway's response.
//!
//! Route-specific behavior:
//!
//! | | `/dict` | `/tasks` |
//! |---|---|---|
//! | `POST`/`PUT` body | must be UTF-8 JSON, `Content-Type` forced | verbatim |
//! | 200 with empty body | `{"message": "Success"}` | `{"status": 200}` |
//! | CORS headers on every outcome | no | yes |

use axum::body::Bytes;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST, TRANSFER_ENCODING};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde_json::{json, Value};
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::cors;
use crate::error::{Result, TaskhubError};

/// Backend selected by the inbound path prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardRoute {
    Dict,
    Tasks,
}

impl ForwardRoute {
    pub fn prefix(&self) -> &'static str {
        match self {
            ForwardRoute::Dict => "/dict/",
            ForwardRoute::Tasks => "/tasks/",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ForwardRoute::Dict => "dict",
            ForwardRoute::Tasks => "tasks",
        }
    }

    fn validates_body(&self) -> bool {
        matches!(self, ForwardRoute::Dict)
    }

    fn synthesizes_success(&self) -> bool {
        matches!(self, ForwardRoute::Dict)
    }
}

/// Inbound request as seen by the forwarder
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    /// Path remainder after the route prefix, without a leading `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ForwardRequest {
    /// Split `full_path` on the route prefix
    pub fn new(
        route: ForwardRoute,
        method: Method,
        full_path: &str,
        query: Vec<(String, String)>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        let path = full_path
            .strip_prefix(route.prefix())
            .or_else(|| full_path.strip_prefix(route.prefix().trim_end_matches('/')))
            .unwrap_or(full_path)
            .trim_start_matches('/')
            .to_string();

        Self {
            method,
            path,
            query,
            headers,
            body,
        }
    }
}

/// Outcome of a forwarded call
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl ForwardResponse {
    fn json(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body,
        }
    }

    /// Answer to an `OPTIONS` request; the backend is never contacted
    pub fn preflight() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            "access-control-allow-methods",
            HeaderValue::from_static(cors::ALLOW_METHODS),
        );
        headers.insert(
            "access-control-allow-headers",
            HeaderValue::from_static(cors::ALLOW_ANY),
        );
        headers.insert(
            "access-control-allow-origin",
            HeaderValue::from_static(cors::ALLOW_ANY),
        );
        Self {
            status: StatusCode::OK,
            headers,
            body: json!({}),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
}

impl Forwarder {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TaskhubError::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }

    pub async fn forward(
        &self,
        route: ForwardRoute,
        base_url: &str,
        request: ForwardRequest,
    ) -> Result<ForwardResponse> {
        if request.method == Method::OPTIONS {
            return Ok(ForwardResponse::preflight());
        }

        let url = target_url(base_url, &request.path);
        let mut headers = request.headers;
        let body = prepare_body(route, &request.method, &mut headers, request.body)?;
        let query = flatten_query(request.query);

        debug!(
            route = route.name(),
            method = %request.method,
            url = %url,
            "Forwarding request"
        );

        let mut outbound = self
            .client
            .request(request.method.clone(), &url)
            .headers(headers)
            .query(&query);
        if let Some(body) = body {
            outbound = outbound.body(body);
        }

        let response = outbound.send().await.map_err(|e| {
            let reason = describe_transport_error(&e);
            warn!(route = route.name(), url = %url, error = %reason, "Backend unreachable");
            TaskhubError::backend_unavailable(reason)
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TaskhubError::backend_unavailable(describe_transport_error(&e)))?;

        translate_response(route, status, &bytes)
    }
}

/// Join `base_url` and `path` with exactly one `/`
pub fn target_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Collapse repeated query keys: the last value wins, keys keep the position
/// of their first appearance
pub fn flatten_query(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut flattened: Vec<(String, String)> = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        match flattened.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => flattened.push((key, value)),
        }
    }
    flattened
}

/// Strip `host` and framing headers, validate the body where the route
/// requires it, and decide what body (if any) goes upstream
fn prepare_body(
    route: ForwardRoute,
    method: &Method,
    headers: &mut HeaderMap,
    body: Bytes,
) -> Result<Option<Bytes>> {
    headers.remove(HOST);
    // Recomputed by the outbound client from the body actually sent
    headers.remove(CONTENT_LENGTH);
    headers.remove(TRANSFER_ENCODING);

    if !route.validates_body() {
        return Ok(Some(body));
    }

    let carries_body = *method == Method::POST || *method == Method::PUT;
    if !carries_body || body.is_empty() {
        return Ok(None);
    }

    let text = std::str::from_utf8(&body).map_err(TaskhubError::invalid_payload)?;
    serde_json::from_str::<Value>(text).map_err(TaskhubError::invalid_payload)?;

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(Some(body))
}

fn translate_response(
    route: ForwardRoute,
    status: StatusCode,
    body: &[u8],
) -> Result<ForwardResponse> {
    if route.synthesizes_success() && status == StatusCode::OK && body.is_empty() {
        return Ok(ForwardResponse::json(status, json!({ "message": "Success" })));
    }

    if !body.is_empty() {
        let parsed: Value =
            serde_json::from_slice(body).map_err(TaskhubError::invalid_backend_response)?;
        return Ok(ForwardResponse::json(status, parsed));
    }

    Ok(ForwardResponse::json(
        status,
        json!({ "status": status.as_u16() }),
    ))
}

/// reqwest's top-level message omits the cause; append the source chain
fn describe_transport_error(error: &reqwest::Error) -> String {
    let mut description = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        description.push_str(": ");
        description.push_str(&cause.to_string());
        source = cause.source();
    }
    description
}
