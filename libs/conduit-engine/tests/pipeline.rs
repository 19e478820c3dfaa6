//! End-to-end tests exercising full input -> filter chain -> output
//! topologies through a real `Worker`, not just the individual plugins.

use std::sync::Arc;
use std::time::Duration;

use conduit_api::{Event, Filter, Input, Output};
use conduit_engine::alert::{AlertRegistry, CaptureAlertSink};
use conduit_engine::cache::MemoryCache;
use conduit_engine::filter::{NoopFilter, ScriptFilter};
use conduit_engine::output::CaptureOutput;
use conduit_engine::Worker;
use serde_json::json;

mod support;
use support::OneShotInput;

#[tokio::test]
async fn pass_through_deep_equals_the_input_event() {
    let input: Arc<dyn Input> = Arc::new(OneShotInput::new(
        "stdin-0",
        json!({"message": "hello"}),
    ));
    let filter: Arc<dyn Filter> = Arc::new(NoopFilter::new("Noop"));
    let capture = CaptureOutput::new("capture-0");
    let output: Arc<dyn Output> = Arc::new(capture.clone());

    let worker = Worker::new(vec![input], vec![filter], vec![output], 16);
    let running = worker.start();
    tokio::time::sleep(Duration::from_millis(100)).await;
    running.stop().await.unwrap();

    let captured = capture.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].data, json!({"message": "hello"}));
}

#[tokio::test]
async fn scripted_mutation_rewrites_and_adds_fields() {
    let input: Arc<dyn Input> = Arc::new(OneShotInput::new(
        "stdin-0",
        json!({"message": 101010101}),
    ));
    let cache = Arc::new(MemoryCache::default());
    let alerts = Arc::new(AlertRegistry::new());
    let filter: Arc<dyn Filter> = Arc::new(ScriptFilter::new(
        "enrich",
        r#"event.message = "testing"; event.added_field = "woot"; event.new_array = ["this","should","be","handled",1,2,3];"#,
        Duration::from_millis(500),
        cache,
        alerts,
    ));
    let capture = CaptureOutput::new("capture-0");
    let output: Arc<dyn Output> = Arc::new(capture.clone());

    let worker = Worker::new(vec![input], vec![filter], vec![output], 16);
    let running = worker.start();
    tokio::time::sleep(Duration::from_millis(100)).await;
    running.stop().await.unwrap();

    let captured = capture.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(
        captured[0].data,
        json!({
            "message": "testing",
            "added_field": "woot",
            "new_array": ["this", "should", "be", "handled", 1, 2, 3],
        })
    );
}

#[tokio::test]
async fn bad_return_type_drops_the_event_downstream_never_sees_it() {
    let cache = Arc::new(MemoryCache::default());
    let alerts = Arc::new(AlertRegistry::new());
    let filter = ScriptFilter::new(
        "reassign",
        r#"event = "testing";"#,
        Duration::from_millis(500),
        cache,
        alerts,
    );
    let input = Event::new(chrono::Utc::now(), "stdin-0", json!({"message": "hello"}));
    let (out, err) = filter.run(input.clone()).await;
    assert_eq!(out, input);
    assert!(matches!(
        err,
        Some(conduit_api::FilterError::EventNotMapping(_))
    ));

    // The drop happens in the worker, not just the filter: wire the same
    // filter into a worker and confirm the capture output never sees it.
    let input: Arc<dyn Input> = Arc::new(OneShotInput::new("stdin-0", json!({"message": "hello"})));
    let filter: Arc<dyn Filter> = Arc::new(filter);
    let capture = CaptureOutput::new("capture-0");
    let output: Arc<dyn Output> = Arc::new(capture.clone());

    let worker = Worker::new(vec![input], vec![filter], vec![output], 16);
    let running = worker.start();
    tokio::time::sleep(Duration::from_millis(100)).await;
    running.stop().await.unwrap();

    assert!(capture.captured().is_empty());
}

#[tokio::test]
async fn infinite_loop_times_out_within_a_small_multiple_of_the_budget() {
    let cache = Arc::new(MemoryCache::default());
    let alerts = Arc::new(AlertRegistry::new());
    let filter = ScriptFilter::new(
        "spin",
        "while(true) { event.value = (event.value || 1) * 2; }",
        Duration::from_nanos(1),
        cache,
        alerts,
    );
    let input = Event::new(chrono::Utc::now(), "stdin-0", json!({"value": 1}));

    let start = std::time::Instant::now();
    let (out, err) = filter.run(input.clone()).await;
    let elapsed = start.elapsed();

    assert_eq!(out, input);
    assert!(matches!(err, Some(conduit_api::FilterError::FilterPanic(_, _))));
    assert!(elapsed < Duration::from_secs(2), "timeout took too long: {elapsed:?}");
}

#[tokio::test]
async fn cache_entries_survive_across_three_events() {
    let cache = Arc::new(MemoryCache::default());
    let alerts = Arc::new(AlertRegistry::new());
    let filter = ScriptFilter::new(
        "cacher",
        r#"cache.store("seen", event); event.count = cache.get("seen").len();"#,
        Duration::from_millis(500),
        cache,
        alerts,
    );

    let mut counts = Vec::new();
    for n in 0..3 {
        let input = Event::new(chrono::Utc::now(), "stdin-0", json!({"n": n}));
        let (out, err) = filter.run(input).await;
        assert!(err.is_none());
        counts.push(out.data["count"].as_i64().unwrap());
    }

    assert_eq!(counts, vec![1, 2, 3]);
}

#[tokio::test]
async fn alert_emit_invokes_the_registered_sink_exactly_once() {
    let cache = Arc::new(MemoryCache::default());
    let alerts = Arc::new(AlertRegistry::new());
    let sink = CaptureAlertSink::new("Noop");
    alerts.register(Arc::new(sink.clone()));
    let filter = ScriptFilter::new(
        "alerter",
        r#"alert.emit("Noop", event); event.handled = true;"#,
        Duration::from_millis(500),
        cache,
        alerts,
    );
    let input = Event::new(chrono::Utc::now(), "stdin-0", json!({"n": 1}));
    let (out, err) = filter.run(input).await;
    assert!(err.is_none());
    assert_eq!(out.data["handled"], json!(true));

    let captured = sink.captured();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].data, json!({"n": 1}));
}

#[tokio::test]
async fn alert_emit_with_unknown_sink_name_is_silently_ignored() {
    let cache = Arc::new(MemoryCache::default());
    let alerts = Arc::new(AlertRegistry::new());
    let filter = ScriptFilter::new(
        "alerter",
        r#"alert.emit("does-not-exist", event); event.handled = true;"#,
        Duration::from_millis(500),
        cache,
        alerts,
    );
    let input = Event::new(chrono::Utc::now(), "stdin-0", json!({"n": 1}));
    let (out, err) = filter.run(input).await;
    assert!(err.is_none());
    assert_eq!(out.data["handled"], json!(true));
}

#[tokio::test]
async fn alert_emit_with_malformed_plugin_name_is_a_graceful_noop() {
    let cache = Arc::new(MemoryCache::default());
    let alerts = Arc::new(AlertRegistry::new());
    let filter = ScriptFilter::new(
        "alerter",
        r#"alert.emit(42, event); event.handled = true;"#,
        Duration::from_millis(500),
        cache,
        alerts,
    );
    let input = Event::new(chrono::Utc::now(), "stdin-0", json!({"n": 1}));
    let (out, err) = filter.run(input).await;
    assert!(err.is_none());
    assert_eq!(out.data["handled"], json!(true));
}

#[tokio::test]
async fn empty_input_and_output_lists_start_and_stop_without_processing() {
    let worker = Worker::new(vec![], vec![], vec![], 16);
    let running = worker.start();
    tokio::time::sleep(Duration::from_millis(20)).await;
    running.stop().await.unwrap();
}
