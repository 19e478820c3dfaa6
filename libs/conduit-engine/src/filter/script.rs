use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use conduit_api::{Cache, Event, Filter, FilterError};
use rhai::{Dynamic, Engine, Map, Scope};
use serde_json::Value;

use crate::alert::AlertRegistry;

/// Script-facing handle bound into the scope as `cache`. Carries the
/// timestamp/input of the event currently being filtered so that a
/// `cache.store` call -- which only ever sees the script's `event` data
/// mapping, not a full event -- can reconstruct one to hand to the
/// underlying `Cache` trait.
#[derive(Clone)]
struct CacheHandle {
    cache: Arc<dyn Cache>,
    timestamp: DateTime<Utc>,
    input: String,
}

/// Script-facing handle bound into the scope as `alert`. `live_event` is a
/// clone of the same shared `Dynamic` bound to the scope's `event` variable
/// -- aliasing it (not a copy) lets `emit` overwrite the live binding a
/// script continues to mutate after the call.
#[derive(Clone)]
struct AlertHandle {
    alerts: Arc<AlertRegistry>,
    timestamp: DateTime<Utc>,
    input: String,
    live_event: Dynamic,
}

fn cache_get(handle: &mut CacheHandle, key: Dynamic) -> Dynamic {
    let Some(key) = key.into_immutable_string().ok() else {
        tracing::warn!("cache.get called with a non-string key, ignoring");
        return Dynamic::UNIT;
    };
    let events = handle.cache.get(key.as_str());
    rhai::serde::to_dynamic(&events).unwrap_or(Dynamic::UNIT)
}

fn cache_store(handle: &mut CacheHandle, key: Dynamic, event_arg: Dynamic) {
    let Some(key) = key.into_immutable_string().ok() else {
        tracing::warn!("cache.store called with a non-string key, ignoring");
        return;
    };
    let event_arg = event_arg.flatten();
    let data = match rhai::serde::from_dynamic::<Value>(&event_arg) {
        Ok(value) if value.is_object() => value,
        _ => {
            tracing::warn!("cache.store called with a non-object event, ignoring");
            return;
        }
    };
    let event = Event::new(handle.timestamp, handle.input.clone(), data);
    handle.cache.store(key.as_str(), event);
}

fn alert_emit(handle: &mut AlertHandle, plugin_name: Dynamic, event_arg: Dynamic) {
    emit_to_sink(handle, plugin_name, event_arg)
}

fn alert_emit_with_extra(
    handle: &mut AlertHandle,
    plugin_name: Dynamic,
    event_arg: Dynamic,
    _extra: Dynamic,
) {
    emit_to_sink(handle, plugin_name, event_arg)
}

fn emit_to_sink(handle: &AlertHandle, plugin_name: Dynamic, event_arg: Dynamic) {
    let Some(plugin_name) = plugin_name.into_immutable_string().ok() else {
        tracing::warn!("alert.emit called with a non-string plugin name, ignoring");
        return;
    };
    let event_arg = event_arg.flatten();
    let data = match rhai::serde::from_dynamic::<Value>(&event_arg) {
        Ok(value) if value.is_object() => value,
        _ => {
            tracing::warn!(sink = %plugin_name, "alert.emit called with a non-object event, ignoring");
            return;
        }
    };

    // The live `event` binding is reassigned from the serialized-then-
    // reparsed argument regardless of whether `plugin_name` resolves to a
    // registered sink -- prior mutations made to a value other than
    // `event_arg` are lost, matching the source's literal behavior.
    if let Some(new_map) = rhai::serde::to_dynamic(&data)
        .ok()
        .and_then(|d| d.try_cast::<Map>())
    {
        let mut live = handle.live_event.clone();
        if let Some(mut guard) = live.write_lock::<Map>() {
            *guard = new_map;
        }
    }

    let Some(sink) = handle.alerts.get(plugin_name.as_str()) else {
        return;
    };
    let event = Event::new(handle.timestamp, handle.input.clone(), data);
    sink.emit(&event);
}

fn register_bridge(engine: &mut Engine) {
    engine.register_type_with_name::<CacheHandle>("Cache");
    engine.register_fn("get", cache_get);
    engine.register_fn("store", cache_store);

    engine.register_type_with_name::<AlertHandle>("Alert");
    engine.register_fn("emit", alert_emit);
    engine.register_fn("emit", alert_emit_with_extra);
}

/// Runs Rhai source against one event's `data` mapping under a wall-clock
/// budget. Every invocation gets a fresh engine and scope -- no state
/// survives between calls except whatever round-trips through the cache.
pub struct ScriptFilter {
    name: String,
    code: String,
    timeout: Duration,
    cache: Arc<dyn Cache>,
    alerts: Arc<AlertRegistry>,
}

impl ScriptFilter {
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        timeout: Duration,
        cache: Arc<dyn Cache>,
        alerts: Arc<AlertRegistry>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            timeout,
            cache,
            alerts,
        }
    }
}

/// Evaluates `code` against `data`, returning the reparsed `data` mapping on
/// success. Runs synchronously -- the caller is responsible for offloading
/// this to a blocking thread and racing it against the timeout.
fn eval(
    name: &str,
    code: &str,
    data: Value,
    timestamp: DateTime<Utc>,
    input: &str,
    cache: Arc<dyn Cache>,
    alerts: Arc<AlertRegistry>,
    interrupted: Arc<AtomicBool>,
) -> Result<Value, FilterError> {
    let mut engine = Engine::new();
    register_bridge(&mut engine);
    engine.on_progress(move |_ops| {
        if interrupted.load(Ordering::Relaxed) {
            Some(Dynamic::UNIT)
        } else {
            None
        }
    });

    // Shared so that `AlertHandle::emit` can overwrite the live binding a
    // script goes on to mutate, rather than just the value it captured.
    let event_dynamic = rhai::serde::to_dynamic(&data)
        .map_err(|e| FilterError::FilterPanic(name.to_string(), format!("failed to bind event: {e}")))?
        .into_shared();

    let mut scope = Scope::new();
    scope.push("event", event_dynamic.clone());
    scope.push(
        "cache",
        CacheHandle {
            cache,
            timestamp,
            input: input.to_string(),
        },
    );
    scope.push(
        "alert",
        AlertHandle {
            alerts,
            timestamp,
            input: input.to_string(),
            live_event: event_dynamic,
        },
    );

    if let Err(err) = engine.eval_with_scope::<Dynamic>(&mut scope, code) {
        return Err(FilterError::FilterPanic(name.to_string(), err.to_string()));
    }

    let event_value = scope
        .get("event")
        .cloned()
        .ok_or_else(|| FilterError::EventNotMapping(name.to_string()))?
        .flatten();
    let reparsed: Value = rhai::serde::from_dynamic(&event_value)
        .map_err(|_| FilterError::EventNotMapping(name.to_string()))?;
    if !reparsed.is_object() {
        return Err(FilterError::EventNotMapping(name.to_string()));
    }
    Ok(reparsed)
}

impl Filter for ScriptFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn run(
        &self,
        event: Event,
    ) -> Pin<Box<dyn Future<Output = (Event, Option<FilterError>)> + Send + '_>> {
        Box::pin(async move {
            let interrupted = Arc::new(AtomicBool::new(false));
            let timer_flag = interrupted.clone();
            let timeout = self.timeout;
            let timer = tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                timer_flag.store(true, Ordering::Relaxed);
            });

            let name = self.name.clone();
            let code = self.code.clone();
            let cache = self.cache.clone();
            let alerts = self.alerts.clone();
            let data = event.data.clone();
            let timestamp = event.timestamp;
            let input = event.input.clone();

            let outcome = tokio::task::spawn_blocking(move || {
                eval(
                    &name,
                    &code,
                    data,
                    timestamp,
                    &input,
                    cache,
                    alerts,
                    interrupted,
                )
            })
            .await;

            timer.abort();

            match outcome {
                Ok(Ok(new_data)) => {
                    let mut event = event;
                    event.data = new_data;
                    (event, None)
                }
                Ok(Err(err)) => (event, Some(err)),
                Err(join_err) => {
                    let err = FilterError::FilterPanic(self.name.clone(), join_err.to_string());
                    (event, Some(err))
                }
            }
        })
    }
}
