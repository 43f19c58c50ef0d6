use std::{path::PathBuf, time::Duration};

use roster_core::{directory::DEFAULT_USER_COUNT, streaming, worker};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_OUTBOUND_BUFFER: usize = 100;

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub worker: WorkerConfig,
    pub directory: DirectoryConfig,
    pub streaming: StreamingConfig,
    pub websocket: WebSocketConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Allowed browser origins. Empty means any origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.is_empty()
            || self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub processing_delay_ms: u64,
}

impl WorkerConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: worker::DEFAULT_PROCESSING_DELAY.as_millis()
                as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    pub user_count: usize,
    pub seed: Option<u64>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            user_count: DEFAULT_USER_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingConfig {
    pub paragraphs: usize,
    pub char_delay_ms: u64,
}

impl StreamingConfig {
    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            paragraphs: streaming::DEFAULT_PARAGRAPHS,
            char_delay_ms: streaming::DEFAULT_CHAR_DELAY.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebSocketConfig {
    /// Frames queued per subscriber before sends start waiting.
    pub outbound_buffer: usize,
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
        }
    }
}

/// Where the configuration came from, for startup logging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
