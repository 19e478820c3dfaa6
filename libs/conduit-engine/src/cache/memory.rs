use std::collections::HashMap;
use std::sync::Mutex;

use conduit_api::{Cache, Event};

/// In-memory cache shared across every filter invocation on every worker.
/// No eviction; `get` returns events in append order, never deduplicated.
///
/// Guarded by a `std::sync::Mutex` rather than the original's unsynchronized
/// map -- scripted filters call `get`/`store` from a blocking thread, never
/// from async code, so a sync mutex is both correct and cheap here.
pub struct MemoryCache {
    name: String,
    events: Mutex<HashMap<String, Vec<Event>>>,
}

impl MemoryCache {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new("Memory")
    }
}

impl Cache for MemoryCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Vec<Event> {
        let guard = match self.events.lock() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!(cache = %self.name, "memory cache lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.get(key).cloned().unwrap_or_default()
    }

    fn store(&self, key: &str, event: Event) {
        let mut guard = match self.events.lock() {
            Ok(g) => g,
            Err(poisoned) => {
                tracing::warn!(cache = %self.name, "memory cache lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        guard.entry(key.to_string()).or_default().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn store_then_store_preserves_order_without_dedup() {
        let cache = MemoryCache::default();
        let e1 = Event::new(Utc::now(), "in", json!({"n": 1}));
        let e2 = Event::new(Utc::now(), "in", json!({"n": 2}));
        cache.store("k", e1.clone());
        cache.store("k", e2.clone());
        assert_eq!(cache.get("k"), vec![e1, e2]);
    }

    #[test]
    fn unknown_key_returns_empty_list() {
        let cache = MemoryCache::default();
        assert!(cache.get("missing").is_empty());
    }
}
