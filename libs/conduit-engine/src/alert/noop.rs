use conduit_api::{AlertSink, Event};

/// Discards every event. Used in tests and as a default alert sink.
pub struct NoopAlertSink {
    name: String,
}

impl NoopAlertSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for NoopAlertSink {
    fn default() -> Self {
        Self::new("Noop")
    }
}

impl AlertSink for NoopAlertSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, _event: &Event) {}
}
