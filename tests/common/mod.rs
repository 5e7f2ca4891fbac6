//! # Integration Test Infrastructure
//!
//! Spawns the service applications and a recording stub backend on
//! ephemeral ports.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use taskhub::config::{BrokerConfig, GatewayConfig};
use taskhub::events::{EventPublisher, InMemoryBroker};
use taskhub::services::TaskService;
use taskhub::web::state::{DictServiceState, GatewayState, TaskServiceState};
use taskhub::web::{create_dict_service_app, create_gateway_app, create_task_service_app};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub type TestResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Running server bound to `127.0.0.1:0`
#[derive(Debug)]
pub struct TestServer {
    pub base_url: String,
    handle: JoinHandle<()>,
    shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl TestServer {
    pub async fn start(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local address");
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("test server failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
            shutdown_tx,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = tokio::time::timeout(Duration::from_secs(5), self.handle).await;
    }
}

/// Address nothing listens on
pub async fn unused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{addr}")
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("build test client")
}

/// Task service backed by an in-memory broker
pub async fn start_task_service() -> (TestServer, InMemoryBroker) {
    let broker = InMemoryBroker::new();
    let publisher = Arc::new(EventPublisher::new(Arc::new(broker.clone())));
    let service = Arc::new(TaskService::new(publisher, &BrokerConfig::default()));
    let app = create_task_service_app(TaskServiceState::new(service, REQUEST_TIMEOUT));
    (TestServer::start(app).await, broker)
}

pub async fn start_dict_service() -> TestServer {
    TestServer::start(create_dict_service_app(DictServiceState::new(REQUEST_TIMEOUT))).await
}

pub async fn start_gateway(dict_service_url: String, task_service_url: String) -> TestServer {
    start_gateway_with(GatewayConfig {
        dict_service_url,
        task_service_url,
        backend_timeout_ms: 5_000,
        ..GatewayConfig::default()
    })
    .await
}

pub async fn start_gateway_with(config: GatewayConfig) -> TestServer {
    let state = GatewayState::new(config).expect("gateway state");
    TestServer::start(create_gateway_app(state)).await
}

/// Request as observed by the stub backend
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug)]
struct StubState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    captured: Mutex<Vec<CapturedRequest>>,
}

/// Backend that records every request and answers with a fixed response
#[derive(Debug, Clone)]
pub struct StubBackend {
    state: Arc<StubState>,
}

impl StubBackend {
    pub fn new(status: StatusCode, body: &'static str) -> Self {
        Self::with_delay(status, body, Duration::ZERO)
    }

    /// Stub that waits `delay` before answering
    pub fn with_delay(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        Self {
            state: Arc::new(StubState {
                status,
                body,
                delay,
                captured: Mutex::new(Vec::new()),
            }),
        }
    }

    pub async fn start(&self) -> TestServer {
        let app = Router::new()
            .fallback(record_request)
            .layer(DefaultBodyLimit::disable())
            .with_state(self.clone());
        TestServer::start(app).await
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.state.captured.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.captured.lock().len()
    }
}

async fn record_request(
    State(stub): State<StubBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    stub.state.captured.lock().push(CapturedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    if !stub.state.delay.is_zero() {
        tokio::time::sleep(stub.state.delay).await;
    }

    (
        stub.state.status,
        [("content-type", "application/json")],
        stub.state.body,
    )
        .into_response()
}
