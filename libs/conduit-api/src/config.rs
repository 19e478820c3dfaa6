use std::collections::HashMap;

use serde::Deserialize;

/// Declaration of a scripted (or noop) filter, as loaded from configuration.
/// Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(rename = "type")]
    pub plugin_type: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
}

/// Declaration of an input, output, cache, or alert plugin. The same shape
/// serves all four families: a `type` string resolved by a factory, a
/// unique `name`, and a flat string-to-string option map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginConfig {
    #[serde(rename = "type")]
    pub plugin_type: String,
    pub name: String,
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl PluginConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    pub fn get_u64(&self, key: &str, default: u64) -> u64 {
        self.get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }
}
