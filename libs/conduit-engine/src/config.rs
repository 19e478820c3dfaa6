use serde::Deserialize;

use conduit_api::{FilterConfig, PluginConfig};

use crate::error::EngineError;

/// Root configuration, parsed from TOML.
///
/// This is deliberately the smallest shape that lands spec.md's "ordered
/// sequences of already-constructed plugin instances" into a file -- CLI,
/// environment, and directory-scanning config discovery are out of scope.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Number of workers sharing the same input/filter/output sets.
    /// `0` means one per available CPU core.
    #[serde(default)]
    pub num_workers: usize,

    /// Per-worker bounded channel capacity. `0` is allowed and reduces the
    /// pipeline to the smallest buffer `tokio` permits (effectively
    /// synchronous handoff).
    #[serde(default = "default_backlog")]
    pub backlog: usize,

    /// Wall-clock budget for a single scripted-filter invocation, in
    /// milliseconds.
    #[serde(default = "default_filter_timeout_ms")]
    pub filter_timeout_ms: u64,

    #[serde(default)]
    pub inputs: Vec<PluginConfig>,

    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    #[serde(default)]
    pub outputs: Vec<PluginConfig>,

    #[serde(default)]
    pub alerts: Vec<PluginConfig>,

    /// Cache plugin type: `"noop"` or `"memory"`.
    #[serde(default = "default_cache")]
    pub cache: String,
}

fn default_backlog() -> usize {
    256
}

fn default_filter_timeout_ms() -> u64 {
    50
}

fn default_cache() -> String {
    "noop".to_string()
}

impl EngineConfig {
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| EngineError::config(format!("{path}: {e}")))?;
        Self::parse(&content)
    }

    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::config(e.to_string()))
    }

    /// Resolve `num_workers = 0` to "one per available CPU core".
    pub fn resolved_num_workers(&self) -> usize {
        if self.num_workers == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.num_workers
        }
    }

    /// `tokio::sync::mpsc::channel` panics on a zero capacity; map
    /// `backlog = 0` to the smallest capacity it allows.
    pub fn resolved_backlog(&self) -> usize {
        self.backlog.max(1)
    }

    pub fn filter_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.filter_timeout_ms)
    }
}
