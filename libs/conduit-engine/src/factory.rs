use std::sync::Arc;

use conduit_api::{AlertSink, Cache, Filter, FilterConfig, Input, Output, PluginConfig};

use crate::alert::{AlertRegistry, LogAlertSink, NoopAlertSink};
use crate::cache::{MemoryCache, NoopCache};
use crate::error::EngineError;
use crate::filter::{NoopFilter, ScriptFilter};
use crate::input::{NoopInput, StdinInput};
use crate::output::{NoopOutput, StdoutOutput};

/// Build a cache from its plugin type string (`"noop"` or `"memory"`).
pub fn build_cache(plugin_type: &str) -> Result<Arc<dyn Cache>, EngineError> {
    match plugin_type {
        "noop" => Ok(Arc::new(NoopCache::default())),
        "memory" => Ok(Arc::new(MemoryCache::default())),
        other => Err(EngineError::config(format!("unknown cache type: '{other}'"))),
    }
}

pub fn build_alert_sink(cfg: &PluginConfig) -> Result<Arc<dyn AlertSink>, EngineError> {
    match cfg.plugin_type.as_str() {
        "noop" => Ok(Arc::new(NoopAlertSink::new(cfg.name.clone()))),
        "log" => Ok(Arc::new(LogAlertSink::new(cfg.name.clone()))),
        other => Err(EngineError::config(format!(
            "alert '{}': unknown type '{other}'",
            cfg.name
        ))),
    }
}

pub fn build_alert_registry(configs: &[PluginConfig]) -> Result<Arc<AlertRegistry>, EngineError> {
    let registry = AlertRegistry::new();
    for cfg in configs {
        registry.register(build_alert_sink(cfg)?);
    }
    Ok(Arc::new(registry))
}

pub fn build_input(cfg: &PluginConfig) -> Result<Arc<dyn Input>, EngineError> {
    match cfg.plugin_type.as_str() {
        "noop" => Ok(Arc::new(NoopInput::new(cfg.name.clone()))),
        "stdin" => Ok(Arc::new(StdinInput::new(cfg.name.clone()))),
        other => Err(EngineError::config(format!(
            "input '{}': unknown type '{other}'",
            cfg.name
        ))),
    }
}

pub fn build_output(cfg: &PluginConfig) -> Result<Arc<dyn Output>, EngineError> {
    match cfg.plugin_type.as_str() {
        "noop" => Ok(Arc::new(NoopOutput::new(cfg.name.clone()))),
        "stdout" => Ok(Arc::new(StdoutOutput::new(cfg.name.clone()))),
        other => Err(EngineError::config(format!(
            "output '{}': unknown type '{other}'",
            cfg.name
        ))),
    }
}

pub fn build_filter(
    cfg: &FilterConfig,
    timeout: std::time::Duration,
    cache: Arc<dyn Cache>,
    alerts: Arc<AlertRegistry>,
) -> Result<Arc<dyn Filter>, EngineError> {
    match cfg.plugin_type.as_str() {
        "noop" => Ok(Arc::new(NoopFilter::new(cfg.name.clone()))),
        "js" => Ok(Arc::new(ScriptFilter::new(
            cfg.name.clone(),
            cfg.code.clone(),
            timeout,
            cache,
            alerts,
        ))),
        other => Err(EngineError::config(format!(
            "filter '{}': unknown type '{other}'",
            cfg.name
        ))),
    }
}
