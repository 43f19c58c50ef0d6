use serde::{Deserialize, Serialize};
use std::{path::PathBuf, str::FromStr};

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub cors: FileCorsConfig,
    #[serde(default)]
    pub worker: FileWorkerConfig,
    #[serde(default)]
    pub directory: FileDirectoryConfig,
    #[serde(default)]
    pub streaming: FileStreamingConfig,
    #[serde(default)]
    pub websocket: FileWebSocketConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileCorsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileWorkerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDirectoryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileStreamingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileWebSocketConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outbound_buffer: Option<usize>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub processing_delay_ms: Option<u64>,
    pub user_count: Option<usize>,
    pub data_seed: Option<u64>,
    pub stream_paragraphs: Option<usize>,
    pub stream_char_delay_ms: Option<u64>,
    pub ws_outbound_buffer: Option<usize>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the environment layer from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            config_path: lookup("ROSTER_CONFIG").map(PathBuf::from),
            server_host: lookup("SERVER_HOST"),
            // SERVER_PORT wins over the conventional PORT
            server_port: parsed(&lookup, "SERVER_PORT")
                .or_else(|| parsed(&lookup, "PORT")),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_csv(&raw)),
            processing_delay_ms: parsed(&lookup, "WORKER_PROCESSING_DELAY_MS"),
            user_count: parsed(&lookup, "MOCK_USER_COUNT"),
            data_seed: parsed(&lookup, "MOCK_DATA_SEED"),
            stream_paragraphs: parsed(&lookup, "STREAM_PARAGRAPHS"),
            stream_char_delay_ms: parsed(&lookup, "STREAM_CHAR_DELAY_MS"),
            ws_outbound_buffer: parsed(&lookup, "WS_OUTBOUND_BUFFER"),
        }
    }
}

fn parsed<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name).and_then(|value| value.trim().parse().ok())
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|part| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
