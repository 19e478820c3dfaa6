use std::future::Future;
use std::pin::Pin;

use conduit_api::{Event, Output, OutputError};

/// Discards every event. Always succeeds.
pub struct NoopOutput {
    name: String,
}

impl NoopOutput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for NoopOutput {
    fn default() -> Self {
        Self::new("Noop")
    }
}

impl Output for NoopOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn send(
        &self,
        _event: Event,
    ) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }
}
