//! email-service liveness server.
//!
//! This is the application entry point. It parses the command line, loads
//! configuration from an optional TOML file, initializes tracing, sets up the
//! Axum router, and starts the HTTP server with graceful shutdown.

use std::time::Duration;

use axum_server::Handle;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use email_service::config::{resolve_log_filter, AppConfig, LogFormat};
use email_service::http::{setup_shutdown_handler, start_server};
use email_service::{create_router, AppError};

/// Liveness endpoint for the email service
#[derive(Parser, Debug)]
#[command(name = "email-service", version, about)]
struct Args {
    /// Path to configuration file (defaults to config/default.toml if present)
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "email_service=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Override http.host from the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Override http.port from the configuration file
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

fn init_tracing(filter: &str, format: LogFormat) -> Result<(), AppError> {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|e| AppError::Logging(format!("invalid filter '{}': {}", filter, e)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| AppError::Logging(e.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    config.http.apply_overrides(args.host, args.port);

    // Initialize tracing with priority: CLI > env > config > default
    let log_filter = resolve_log_filter(
        args.log_level,
        std::env::var("RUST_LOG").ok(),
        &config.logging,
    );
    init_tracing(&log_filter, config.logging.format)?;

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        tls = ?config.http.tls.mode,
        "Loaded configuration"
    );

    let app = create_router();

    let handle = Handle::new();
    setup_shutdown_handler(
        handle.clone(),
        Duration::from_secs(config.http.shutdown_timeout_seconds),
    );

    start_server(app, &config.http, handle).await?;

    tracing::info!("Server stopped");
    Ok(())
}
