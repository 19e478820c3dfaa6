use std::sync::Arc;

use conduit_api::{Event, Filter, Input, Output};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::EngineError;

async fn run_input(input: Arc<dyn Input>, tx: mpsc::Sender<Event>, cancel: CancellationToken) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            result = input.next() => match result {
                Ok(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(input = %input.name(), error = %e, "error reading from input");
                    // Back off instead of hammering a broken input with a tight retry loop.
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(INPUT_RETRY_BACKOFF) => {}
                    }
                }
            },
        }
    }
}

const INPUT_RETRY_BACKOFF: std::time::Duration = std::time::Duration::from_millis(50);

async fn run_filter(
    mut incoming: mpsc::Receiver<Event>,
    outgoing: mpsc::Sender<Event>,
    filters: Vec<Arc<dyn Filter>>,
    cancel: CancellationToken,
) {
    loop {
        let mut event = tokio::select! {
            _ = cancel.cancelled() => break,
            received = incoming.recv() => match received {
                Some(event) => event,
                None => break,
            },
        };

        let mut failed = false;
        for filter in &filters {
            let (next_event, err) = filter.run(event).await;
            event = next_event;
            if let Some(err) = err {
                tracing::error!(
                    filter = %filter.name(),
                    event = %event.to_text(false),
                    error = %err,
                    "filter error"
                );
                failed = true;
                break;
            }
        }

        if !failed && outgoing.send(event).await.is_err() {
            break;
        }
    }
}

async fn run_output(
    mut outgoing: mpsc::Receiver<Event>,
    outputs: Vec<Arc<dyn Output>>,
    cancel: CancellationToken,
) {
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            received = outgoing.recv() => match received {
                Some(event) => event,
                None => break,
            },
        };

        for output in &outputs {
            if let Err(e) = output.send(event.clone()).await {
                tracing::error!(output = %output.name(), error = %e, "error sending to output");
            }
        }
    }
}

/// An idle, unstarted worker: a set of inputs, a filter chain, and a set of
/// outputs, plus the bounded channels connecting them.
pub struct Worker {
    inputs: Vec<Arc<dyn Input>>,
    filters: Vec<Arc<dyn Filter>>,
    outputs: Vec<Arc<dyn Output>>,
    backlog: usize,
}

impl Worker {
    pub fn new(
        inputs: Vec<Arc<dyn Input>>,
        filters: Vec<Arc<dyn Filter>>,
        outputs: Vec<Arc<dyn Output>>,
        backlog: usize,
    ) -> Self {
        Self {
            inputs,
            filters,
            outputs,
            backlog,
        }
    }

    /// Spawn the input, filter, and output tasks. Consumes `self` -- an
    /// idle worker cannot be started twice.
    pub fn start(self) -> RunningWorker {
        let (incoming_tx, incoming_rx) = mpsc::channel(self.backlog);
        let (outgoing_tx, outgoing_rx) = mpsc::channel(self.backlog);
        let cancel = CancellationToken::new();

        let mut tasks: Vec<JoinHandle<()>> = Vec::new();
        for input in &self.inputs {
            let input = input.clone();
            let tx = incoming_tx.clone();
            let cancel = cancel.clone();
            tasks.push(tokio::spawn(run_input(input, tx, cancel)));
        }
        drop(incoming_tx);

        tasks.push(tokio::spawn(run_filter(
            incoming_rx,
            outgoing_tx,
            self.filters,
            cancel.clone(),
        )));
        tasks.push(tokio::spawn(run_output(
            outgoing_rx,
            self.outputs.clone(),
            cancel.clone(),
        )));

        RunningWorker {
            inputs: self.inputs,
            outputs: self.outputs,
            cancel,
            tasks,
        }
    }
}

/// A started worker. A stopped worker is not restartable -- `stop()`
/// consumes it.
pub struct RunningWorker {
    inputs: Vec<Arc<dyn Input>>,
    outputs: Vec<Arc<dyn Output>>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl RunningWorker {
    /// Signal shutdown, close every input and output, and wait for every
    /// task to finish draining. Returns the first `Close()` error seen,
    /// across inputs and outputs alike; later errors are logged but do not
    /// stop the rest of shutdown from proceeding.
    pub async fn stop(self) -> Result<(), EngineError> {
        self.cancel.cancel();

        let mut first_err: Option<EngineError> = None;
        for input in &self.inputs {
            if let Err(e) = input.close().await {
                tracing::error!(input = %input.name(), error = %e, "error closing input");
                if first_err.is_none() {
                    first_err = Some(e.into());
                }
            }
        }

        for task in self.tasks {
            let _ = task.await;
        }

        for output in &self.outputs {
            if let Err(e) = output.close().await {
                tracing::error!(output = %output.name(), error = %e, "error closing output");
                if first_err.is_none() {
                    first_err = Some(e.into());
                }
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::NoopFilter;
    use crate::input::NoopInput;
    use crate::output::CaptureOutput;
    use conduit_api::InputError;
    use serde_json::json;
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    struct OneShotInput {
        inner: NoopInput,
        sent: std::sync::atomic::AtomicBool,
        name: String,
    }

    impl OneShotInput {
        fn new(name: &str) -> Self {
            Self {
                inner: NoopInput::new(name),
                sent: std::sync::atomic::AtomicBool::new(false),
                name: name.to_string(),
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
                if !self.sent.swap(true, std::sync::atomic::Ordering::SeqCst) {
                    Ok(Event::new(chrono::Utc::now(), &self.name, json!({"message": "hello"})))
                } else {
                    self.inner.next().await
                }
            })
        }

        fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>> {
            self.inner.close()
        }
    }

    #[tokio::test]
    async fn pass_through_with_noop_filter_captures_the_input_event() {
        let input: Arc<dyn Input> = Arc::new(OneShotInput::new("test-input"));
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
}
