use conduit_api::{AlertSink, Event};

/// Emits a structured log record instead of talking to any real backend --
/// ambient "alerting" with no external transport to configure.
pub struct LogAlertSink {
    name: String,
}

impl LogAlertSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AlertSink for LogAlertSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn emit(&self, event: &Event) {
        tracing::info!(sink = %self.name, event = %event.to_text(false), "alert");
    }
}
