use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use conduit_api::{Event, Output, OutputError};

/// Appends every event it receives to a shared list instead of any real
/// transport. Not reachable from the plugin factory -- integration tests
/// construct it directly so they can assert on what reached an output
/// without scraping stdout.
#[derive(Clone, Default)]
pub struct CaptureOutput {
    name: String,
    events: Arc<Mutex<Vec<Event>>>,
}

impl CaptureOutput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn captured(&self) -> Vec<Event> {
        let guard = match self.events.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clone()
    }
}

impl Output for CaptureOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn send(
        &self,
        event: Event,
    ) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async move {
            let mut guard = match self.events.lock() {
                Ok(g) => g,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.push(event);
            Ok(())
        })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }
}
