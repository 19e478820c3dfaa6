/// Transient input failure. Logged and dropped by the worker; the input
/// task keeps running.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct InputError {
    pub message: String,
}

impl InputError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Output delivery failure. Logged per sink; the pipeline does not retry --
/// retry policy belongs with the sink's own transport semantics.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct OutputError {
    pub message: String,
}

impl OutputError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Filter failure. Every variant causes the event to be dropped from the
/// remainder of the chain and never reach an output.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The scripting runtime aborted the run -- a runtime error, an
    /// interrupted (timed-out) execution, or any other unexpected failure.
    #[error("filter '{0}' panicked: {1}")]
    FilterPanic(String, String),

    /// The script left `event` bound to something other than a mapping.
    #[error("filter '{0}' left event as a non-mapping value")]
    EventNotMapping(String),

    /// The filter plugin itself chose to fail this event.
    #[error("filter '{0}' rejected event: {1}")]
    PluginRejected(String, String),
}

impl FilterError {
    pub fn name(&self) -> &str {
        match self {
            FilterError::FilterPanic(name, _) => name,
            FilterError::EventNotMapping(name) => name,
            FilterError::PluginRejected(name, _) => name,
        }
    }
}
