use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};

use conduit_api::{Event, Input, InputError};
use conduit_engine::input::NoopInput;
use serde_json::Value;

/// Produces exactly one event carrying `data`, then behaves like `noop` --
/// parks until closed. Lets a test drive a worker through a single event
/// without needing a live source.
pub struct OneShotInput {
    name: String,
    data: Value,
    sent: AtomicBool,
    tail: NoopInput,
}

impl OneShotInput {
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        let name = name.into();
        Self {
            tail: NoopInput::new(name.clone()),
            name,
            data,
            sent: AtomicBool::new(false),
        }
    }
}

impl Input for OneShotInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn next(&self) -> Pin<Box<dyn Future<Output = Result<Event, InputError>> + Send + '_>> {
        Box::pin(async move {
            if !self.sent.swap(true, Ordering::SeqCst) {
                Ok(Event::new(chrono::Utc::now(), self.name.clone(), self.data.clone()))
            } else {
                self.tail.next().await
            }
        })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>> {
        self.tail.close()
    }
}
