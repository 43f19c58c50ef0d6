use once_cell::sync::Lazy;
use std::{fs, path::PathBuf};
use thiserror::Error;

use super::{
    models::{
        Config, ConfigMetadata, CorsConfig, DEFAULT_HOST, DEFAULT_OUTBOUND_BUFFER,
        DEFAULT_PORT, DirectoryConfig, ServerConfig, StreamingConfig,
        WebSocketConfig, WorkerConfig,
    },
    sources::{EnvConfig, FileConfig},
    validation::{self, ConfigGuardRailError, ConfigWarnings},
};

static DEFAULT_CONFIG_LOCATIONS: Lazy<Vec<PathBuf>> = Lazy::new(|| {
    vec![
        PathBuf::from("roster.toml"),
        PathBuf::from("config/roster.toml"),
    ]
});

#[derive(Debug, Default, Clone)]
pub struct ConfigLoaderOptions {
    pub config_path: Option<PathBuf>,
    pub env_file: Option<PathBuf>,
}

/// Layers `.env`, environment variables and an optional TOML file into a
/// [`Config`]. Environment values win over the file.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    options: ConfigLoaderOptions,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConfigLoaderOptions) -> Self {
        Self { options }
    }

    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.options.env_file = Some(path.into());
        self
    }

    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file_loaded = match &self.options.env_file {
            Some(path) => dotenvy::from_path(path).map(|_| true).or_else(
                |err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                },
            )?,
            None => {
                dotenvy::dotenv().map(|_| true).or_else(|err| match err {
                    dotenvy::Error::Io(_) => Ok(false),
                    _ => Err(err),
                })?
            }
        };

        self.load_from_env(EnvConfig::gather(), env_file_loaded)
    }

    /// Resolves the file layer and composes it with an already gathered
    /// environment layer.
    pub fn load_from_env(
        &self,
        env: EnvConfig,
        env_file_loaded: bool,
    ) -> Result<ConfigLoad, ConfigLoadError> {
        let (file_config, config_path) = self.load_file_config(&env)?;
        let mut warnings = ConfigWarnings::default();
        if config_path.is_none() {
            warnings.push_with_hint(
                "No roster.toml detected; using environment variables and defaults",
                "Create roster.toml or point ROSTER_CONFIG at a config file",
            );
        }

        let mut config = compose_config(file_config.unwrap_or_default(), env);
        config.metadata = ConfigMetadata {
            config_path,
            env_file_loaded,
        };

        warnings.extend(validation::apply_guard_rails(&config)?);
        Ok(ConfigLoad { config, warnings })
    }

    fn load_file_config(
        &self,
        env: &EnvConfig,
    ) -> Result<(Option<FileConfig>, Option<PathBuf>), ConfigLoadError> {
        let explicit = self
            .options
            .config_path
            .clone()
            .or_else(|| env.config_path.clone());

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(ConfigLoadError::MissingConfig { path });
            }
            Some(path) => path,
            None => match DEFAULT_CONFIG_LOCATIONS
                .iter()
                .find(|candidate| candidate.exists())
            {
                Some(found) => found.clone(),
                None => return Ok((None, None)),
            },
        };

        let contents =
            fs::read_to_string(&path).map_err(|err| ConfigLoadError::Io {
                path: path.clone(),
                source: err,
            })?;
        let file_config: FileConfig =
            toml::from_str(&contents).map_err(|err| ConfigLoadError::Parse {
                path: path.clone(),
                source: err,
            })?;

        Ok((Some(file_config), Some(path)))
    }
}

fn compose_config(file: FileConfig, env: EnvConfig) -> Config {
    let FileConfig {
        server: file_server,
        cors: file_cors,
        worker: file_worker,
        directory: file_directory,
        streaming: file_streaming,
        websocket: file_websocket,
    } = file;
    let worker_defaults = WorkerConfig::default();
    let streaming_defaults = StreamingConfig::default();
    let directory_defaults = DirectoryConfig::default();

    Config {
        server: ServerConfig {
            host: env
                .server_host
                .or(file_server.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env.server_port.or(file_server.port).unwrap_or(DEFAULT_PORT),
        },
        cors: CorsConfig {
            allowed_origins: env
                .cors_allowed_origins
                .or(file_cors.allowed_origins)
                .unwrap_or_default(),
        },
        worker: WorkerConfig {
            processing_delay_ms: env
                .processing_delay_ms
                .or(file_worker.processing_delay_ms)
                .unwrap_or(worker_defaults.processing_delay_ms),
        },
        directory: DirectoryConfig {
            user_count: env
                .user_count
                .or(file_directory.user_count)
                .unwrap_or(directory_defaults.user_count),
            seed: env.data_seed.or(file_directory.seed),
        },
        streaming: StreamingConfig {
            paragraphs: env
                .stream_paragraphs
                .or(file_streaming.paragraphs)
                .unwrap_or(streaming_defaults.paragraphs),
            char_delay_ms: env
                .stream_char_delay_ms
                .or(file_streaming.char_delay_ms)
                .unwrap_or(streaming_defaults.char_delay_ms),
        },
        websocket: WebSocketConfig {
            outbound_buffer: env
                .ws_outbound_buffer
                .or(file_websocket.outbound_buffer)
                .unwrap_or(DEFAULT_OUTBOUND_BUFFER),
        },
        metadata: ConfigMetadata::default(),
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("configuration file missing: {path}")]
    MissingConfig { path: PathBuf },
    #[error("failed to read configuration {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    GuardRail(#[from] ConfigGuardRailError),
    #[error(transparent)]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Debug)]
pub struct ConfigLoad {
    pub config: Config,
    pub warnings: ConfigWarnings,
}
