use std::future::Future;
use std::pin::Pin;

use conduit_api::{Event, Filter, FilterError};

/// Returns every event unchanged. Never errors.
pub struct NoopFilter {
    name: String,
}

impl NoopFilter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for NoopFilter {
    fn default() -> Self {
        Self::new("Noop")
    }
}

impl Filter for NoopFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(
        &self,
        event: Event,
    ) -> Pin<Box<dyn Future<Output = (Event, Option<FilterError>)> + Send + '_>> {
        Box::pin(async move { (event, None) })
    }
}
