use std::future::Future;
use std::pin::Pin;

use crate::error::OutputError;
use crate::event::Event;

/// Sink accepting one event per `send()`.
pub trait Output: Send + Sync {
    fn name(&self) -> &str;

    fn open(&self) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>>;

    /// Deliver a single event. On error the pipeline logs and moves on --
    /// retry policy belongs with the sink, since the right behavior
    /// (block, drop, queue-to-disk) differs per sink.
    fn send(
        &self,
        event: Event,
    ) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>>;

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>>;
}
