use std::future::Future;
use std::pin::Pin;

use crate::error::FilterError;
use crate::event::Event;

/// A pure-ish transformation `Event -> Event`, possibly with side effects
/// via cache/alert bridges (scripted variants).
///
/// On failure, `run` must return the *unchanged* input event alongside the
/// error -- callers observe the event that provoked the failure, and the
/// pipeline moves on to the next event without corrupting state.
pub trait Filter: Send + Sync {
    fn name(&self) -> &str;

    fn run(
        &self,
        event: Event,
    ) -> Pin<Box<dyn Future<Output = (Event, Option<FilterError>)> + Send + '_>>;
}
