use std::future::Future;
use std::pin::Pin;

use conduit_api::{Event, Input, InputError};
use tokio::sync::Notify;

/// Produces nothing. `next()` parks until `close()` wakes it, then fails --
/// used for topology tests that need a live input without a live source.
#[derive(Default)]
pub struct NoopInput {
    name: String,
    closed: Notify,
}

impl NoopInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            closed: Notify::new(),
        }
    }
}

impl Input for NoopInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn next(&self) -> Pin<Box<dyn Future<Output = Result<Event, InputError>> + Send + '_>> {
        Box::pin(async move {
            self.closed.notified().await;
            Err(InputError::new("noop input closed"))
        })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>> {
        Box::pin(async move {
            self.closed.notify_waiters();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn close_wakes_pending_next() {
        let input = std::sync::Arc::new(NoopInput::new("Noop"));
        let reader = input.clone();
        let task = tokio::spawn(async move { reader.next().await });
        tokio::task::yield_now().await;
        input.close().await.unwrap();
        let result = task.await.unwrap();
        assert!(result.is_err());
    }
}
