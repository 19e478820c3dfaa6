use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single event flowing through the pipeline: a timestamp, the name of the
/// input that produced it, and an arbitrary JSON tree.
///
/// `data` is always an object at the root -- enforced on decode, preserved
/// through every successful filter run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub input: String,
    pub data: Value,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid event data: {0}")]
pub struct InvalidEventData(pub String);

impl Event {
    pub fn new(timestamp: DateTime<Utc>, input: impl Into<String>, data: Value) -> Self {
        Self {
            timestamp,
            input: input.into(),
            data,
        }
    }

    /// Encode as JSON bytes. A serialization failure (unrepresentable `data`,
    /// e.g. a non-finite float smuggled in by a script) yields an empty
    /// vector rather than panicking -- the caller supplied the data, the
    /// pipeline degrades instead of crashing.
    pub fn to_bytes(&self, pretty: bool) -> Vec<u8> {
        self.to_text(pretty).into_bytes()
    }

    /// Encode as a JSON string. See `to_bytes` for failure behavior.
    pub fn to_text(&self, pretty: bool) -> String {
        if pretty {
            serde_json::to_string_pretty(self).unwrap_or_default()
        } else {
            serde_json::to_string(self).unwrap_or_default()
        }
    }

    /// Parse `data` (not a full `Event`) from JSON text. The root must be an
    /// object -- a bare scalar or array is rejected even though it's
    /// otherwise valid JSON.
    pub fn parse_data(text: &str) -> Result<Value, InvalidEventData> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| InvalidEventData(e.to_string()))?;
        if !value.is_object() {
            return Err(InvalidEventData(
                "root of event data must be a JSON object".to_string(),
            ));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_through_text() {
        let event = Event::new(Utc::now(), "stdin-0", json!({"message": "hello"}));
        let text = event.to_text(false);
        let decoded: Event = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn parse_data_rejects_non_object_root() {
        assert!(Event::parse_data("\"just a string\"").is_err());
        assert!(Event::parse_data("[1,2,3]").is_err());
        assert!(Event::parse_data("not json at all").is_err());
    }

    #[test]
    fn parse_data_accepts_object_root() {
        let data = Event::parse_data(r#"{"a":1,"b":[1,2,3]}"#).unwrap();
        assert_eq!(data["a"], json!(1));
    }
}
