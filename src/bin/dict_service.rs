//! # Taskhub Dictionary Service

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use taskhub::config::ConfigManager;
use taskhub::constants::services;
use taskhub::logging::init_structured_logging;
use taskhub::web::{create_dict_service_app, shutdown_signal, state::DictServiceState};
use tracing::info;

#[derive(Parser)]
#[command(name = "taskhub-dict-service")]
#[command(about = "Taskhub dictionary service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration directory (default: config)
    #[arg(short, long)]
    config_dir: Option<PathBuf>,

    /// Environment name (default: TASKHUB_ENV, APP_ENV, then development)
    #[arg(short, long)]
    environment: Option<String>,

    /// Listen address, overrides dict_service.bind_address
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

    let mut config = manager.config().dict_service.clone();
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }

    init_structured_logging(services::DICT_SERVICE, &environment, &manager.config().logging);

    let app = create_dict_service_app(DictServiceState::new(config.request_timeout()));

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    info!(
        service = services::DICT_SERVICE,
        environment = %environment,
        address = %config.bind_address,
        "Dictionary service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("dictionary service server error")?;

    info!("Dictionary service stopped");
    Ok(())
}
