use conduit_api::{Cache, Event};

/// Stores nothing; `get` always returns an empty list, never absent.
pub struct NoopCache {
    name: String,
}

impl NoopCache {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for NoopCache {
    fn default() -> Self {
        Self::new("Noop")
    }
}

impl Cache for NoopCache {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, _key: &str) -> Vec<Event> {
        Vec::new()
    }

    fn store(&self, _key: &str, _event: Event) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn get_is_always_empty_and_store_is_discarded() {
        let cache = NoopCache::default();
        cache.store("k", Event::new(Utc::now(), "in", json!({})));
        assert!(cache.get("k").is_empty());
    }
}
