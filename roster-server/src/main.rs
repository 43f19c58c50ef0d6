//! # Roster Server
//!
//! Serves the worker queue, its WebSocket notification channel, the mock
//! user directory and the text stream.
//!
//! Configuration is layered: `.env`, environment variables, an optional
//! `roster.toml`, then command-line flags.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use roster_server::{
    infra::{
        app_state::AppState,
        config::{ConfigLoader, ConfigLoaderOptions},
        telemetry,
    },
    routes,
};
use tracing::info;

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "roster-server")]
#[command(
    about = "Worker queue, live notifications and mock user directory for the Roster demo"
)]
struct Cli {
    /// Server port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Path to a roster.toml configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a .env file loaded before reading the environment
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Simulated processing time per worker request, in milliseconds
    #[arg(long)]
    processing_delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut load = ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: cli.config.clone(),
        env_file: cli.env_file.clone(),
    })
    .load()
    .context("failed to load configuration")?;

    if let Some(port) = cli.port {
        load.config.server.port = port;
    }
    if let Some(host) = cli.host.clone() {
        load.config.server.host = host;
    }
    if let Some(delay) = cli.processing_delay_ms {
        load.config.worker.processing_delay_ms = delay;
    }

    telemetry::init_tracing();
    telemetry::log_config_load(&load);
    let config = load.config;

    let host = config.server.host.clone();
    let port = config.server.port;
    let state = AppState::from_config(config);
    let app = routes::create_app(state);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    let local_addr = listener.local_addr()?;

    info!("Starting Roster server on {}", local_addr);
    info!("Health check: http://{}/api/health", local_addr);
    info!("WebSocket channel: ws://{}/ws", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Roster server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
