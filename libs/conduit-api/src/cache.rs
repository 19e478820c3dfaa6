use crate::event::Event;

/// Keyed mapping from a string to an append-only list of events, shared by
/// every scripted filter invocation across every worker.
///
/// Implementations must be safe under concurrent access -- `get`/`store`
/// take `&self`, never `&mut self`, and are expected to manage their own
/// interior mutability.
pub trait Cache: Send + Sync {
    fn name(&self) -> &str;

    /// Current list of events stored at `key`, in append order. Never
    /// absent -- an unknown key yields an empty list, not `None`.
    fn get(&self, key: &str) -> Vec<Event>;

    /// Append `event` to the list at `key`, creating it if absent.
    fn store(&self, key: &str, event: Event);
}
