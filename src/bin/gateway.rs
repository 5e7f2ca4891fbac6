//! # Taskhub API Gateway
//!
//! Forwards `/dict/*` to the dictionary service and `/tasks/*` to the task
//! service.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use taskhub::config::ConfigManager;
use taskhub::constants::services;
use taskhub::logging::init_structured_logging;
use taskhub::web::{create_gateway_app, shutdown_signal, state::GatewayState};
use tracing::info;

#[derive(Parser)]
#[command(name = "taskhub-gateway")]
#[command(about = "Taskhub API gateway")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration directory (default: config)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Environment name (default: TASKHUB_ENV, APP_ENV, then development)
    #[arg(short, long)]
    environment: Option<String>,

    /// Listen address, overrides gateway.bind_address
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

    let mut config = manager.config().gateway.clone();
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    init_structured_logging(services::GATEWAY, &environment, &manager.config().logging);

    let bind_address = config.bind_address.clone();
    let app = create_gateway_app(GatewayState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    info!(
        service = services::GATEWAY,
        environment = %environment,
        address = %bind_address,
        "Gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server error")?;

    info!("Gateway stopped");
    Ok(())
}
