use std::sync::{Arc, Mutex};

use conduit_api::{AlertSink, Event};

/// Records every event it receives instead of discarding or logging it.
/// Not reachable from the plugin factory -- tests construct it directly so
/// they can assert a sink was actually invoked.
#[derive(Clone, Default)]
pub struct CaptureAlertSink {
    name: String,
    events: Arc<Mutex<Vec<Event>>>,
}

impl CaptureAlertSink {
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

impl AlertSink for CaptureAlertSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, event: &Event) {
        let mut guard = match self.events.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(event.clone());
    }
}
