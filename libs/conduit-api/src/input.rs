use std::future::Future;
use std::pin::Pin;

use crate::error::InputError;
use crate::event::Event;

/// Lazy source of events, producing one event per `next()`.
///
/// The engine never enumerates concrete implementations -- it only ever
/// sees this trait, dispatched to a concrete variant by a factory keyed on
/// a config `type` string.
pub trait Input: Send + Sync {
    fn name(&self) -> &str;

    /// Initialize background I/O. Must be idempotent over a single
    /// open-then-close cycle.
    fn open(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>>;

    /// Return the next event. May block indefinitely. An `Err` is always
    /// treated as transient by the worker driving this input: it is logged
    /// and `next()` is called again after a short backoff, indefinitely --
    /// an input with no way to recover must say so itself (e.g. by never
    /// returning from `next()` again) rather than relying on the caller to
    /// give up.
    fn next(&self) -> Pin<Box<dyn Future<Output = Result<Event, InputError>> + Send + '_>>;

    /// Terminate background I/O and release resources. Must make any
    /// in-progress `next()` return promptly.
    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>>;
}
