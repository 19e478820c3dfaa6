use crate::event::Event;

/// Fire-and-forget delivery of an event to a named external backend.
/// Delivery semantics (retry, buffering, drop-on-backpressure) are the
/// sink's responsibility, not the engine's.
pub trait AlertSink: Send + Sync {
    fn name(&self) -> &str;

    fn emit(&self, event: &Event);
}
