use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infra::config::ConfigLoad;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=warn";

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs where the configuration came from and every collected warning.
pub fn log_config_load(load: &ConfigLoad) {
    let config = &load.config;

    if config.metadata.env_file_loaded {
        tracing::info!("loaded .env file");
    }
    match &config.metadata.config_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "configuration file loaded")
        }
        None => tracing::info!("no configuration file; using environment"),
    }

    for warning in &load.warnings.items {
        match &warning.hint {
            Some(hint) => {
                tracing::warn!(warning = %warning.message, hint = %hint, "configuration warning")
            }
            None => {
                tracing::warn!(warning = %warning.message, "configuration warning")
            }
        }
    }

    tracing::info!(
        worker.processing_delay_ms = config.worker.processing_delay_ms,
        directory.user_count = config.directory.user_count,
        streaming.paragraphs = config.streaming.paragraphs,
        streaming.char_delay_ms = config.streaming.char_delay_ms,
        websocket.outbound_buffer = config.websocket.outbound_buffer,
        cors.permissive = config.cors.is_permissive(),
        "configuration in effect"
    );
}
