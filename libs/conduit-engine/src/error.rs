#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("plugin error: {0}")]
    Plugin(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Add context to the error, preserving the original variant.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            EngineError::Plugin(msg) => EngineError::Plugin(format!("{ctx}: {msg}")),
            other => other,
        }
    }
}

impl From<conduit_api::InputError> for EngineError {
    fn from(e: conduit_api::InputError) -> Self {
        EngineError::Plugin(e.to_string())
    }
}

impl From<conduit_api::OutputError> for EngineError {
    fn from(e: conduit_api::OutputError) -> Self {
        EngineError::Plugin(e.to_string())
    }
}
