//! # Taskhub Task Service
//!
//! Task CRUD with Kafka lifecycle events.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use taskhub::config::ConfigManager;
use taskhub::constants::services;
use taskhub::logging::init_structured_logging;
use taskhub::web::{create_task_service_app, shutdown_signal, state::TaskServiceState};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "taskhub-task-service")]
#[command(about = "Taskhub task service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration directory (default: config)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Environment name (default: TASKHUB_ENV, APP_ENV, then development)
    #[arg(short, long)]
    environment: Option<String>,

    /// Listen address, overrides task_service.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let environment = cli
        .environment
        .unwrap_or_else(ConfigManager::detect_environment);
    let manager = ConfigManager::load_from_directory_with_env(cli.config_dir, &environment)
        .context("failed to load configuration")?;

    let mut config = manager.config().clone();
    if let Some(bind) = cli.bind {
        config.task_service.bind_address = bind;
    }

    init_structured_logging(services::TASK_SERVICE, &environment, &config.logging);

    let state = TaskServiceState::from_config(&config);

    // Warm-up only; the publisher reconnects lazily on the first publish.
    if let Err(e) = state.service.publisher().ensure_connected().await {
        warn!(error = %e, "Broker not reachable at startup");
    }

    let bind_address = config.task_service.bind_address.clone();
    let app = create_task_service_app(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    info!(
        service = services::TASK_SERVICE,
        environment = %environment,
        address = %bind_address,
        "Task service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("task service server error")?;

    info!("Task service stopped");
    Ok(())
}
