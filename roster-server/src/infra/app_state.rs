use std::{fmt, sync::Arc};

use roster_core::{
    directory::Directory,
    worker::{QueueCoordinator, RequestProcessor, SimulatedProcessor},
};

use crate::infra::{config::Config, websocket::ConnectionManager};

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub queue: QueueCoordinator,
    pub directory: Arc<Directory>,
    pub websocket_manager: Arc<ConnectionManager>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("websocket_manager", &self.websocket_manager)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Builds the queue, directory and subscriber registry described by
    /// `config`. The queue publishes through the subscriber registry.
    pub fn from_config(config: Config) -> Self {
        let processor: Arc<dyn RequestProcessor> = Arc::new(
            SimulatedProcessor::new(config.worker.processing_delay()),
        );
        Self::with_processor(config, processor)
    }

    /// Same as [`from_config`](Self::from_config) with a caller-supplied
    /// processor.
    pub fn with_processor(
        config: Config,
        processor: Arc<dyn RequestProcessor>,
    ) -> Self {
        let websocket_manager = Arc::new(ConnectionManager::new());
        let queue = QueueCoordinator::new(processor, websocket_manager.clone());
        let directory = Arc::new(Directory::generate(
            config.directory.user_count,
            config.directory.seed,
        ));

        Self {
            config: Arc::new(config),
            queue,
            directory,
            websocket_manager,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
