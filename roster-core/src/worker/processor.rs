//! Job processors.

use std::time::Duration;

use async_trait::async_trait;

use crate::{error::Result, lorem};

/// Default simulated work time for one request.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

/// Unit of work run once per submitted request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestProcessor: Send + Sync {
    /// Runs one job and returns its result text.
    async fn process(&self) -> Result<String>;
}

/// Waits a fixed delay and answers with a lorem paragraph. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    /// A processor that waits `delay` per job.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Simulated work time per job.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

#[async_trait]
impl RequestProcessor for SimulatedProcessor {
    async fn process(&self) -> Result<String> {
        tokio::time::sleep(self.delay).await;
        Ok(lorem::paragraph(&mut rand::rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn simulated_processor_waits_for_its_delay() {
        let processor = SimulatedProcessor::new(Duration::from_millis(500));
        let started = tokio::time::Instant::now();

        let text = processor.process().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert!(!text.is_empty());
        assert!(text.ends_with('.'));
    }
}
