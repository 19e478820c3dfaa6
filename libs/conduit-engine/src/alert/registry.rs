use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use conduit_api::AlertSink;

/// String-keyed registry of alert sinks, built once at bootstrap and
/// treated as immutable thereafter. Lookups from scripted filters are
/// case-sensitive.
#[derive(Default)]
pub struct AlertRegistry {
    sinks: RwLock<HashMap<String, Arc<dyn AlertSink>>>,
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, sink: Arc<dyn AlertSink>) {
        let name = sink.name().to_string();
        let mut guard = match self.sinks.write() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("alert registry write lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.insert(name, sink);
    }

    /// Resolve a sink by name, or `None` if unknown -- callers (the
    /// scripted filter bridge) are expected to silently ignore an unknown
    /// name rather than treat it as an error.
    pub fn get(&self, name: &str) -> Option<Arc<dyn AlertSink>> {
        let guard = match self.sinks.read() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!("alert registry read lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.get(name).cloned()
    }
}
