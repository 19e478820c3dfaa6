use std::future::Future;
use std::pin::Pin;

use conduit_api::{Event, Output, OutputError};
use tokio::io::{AsyncWriteExt, BufWriter, Stdout};
use tokio::sync::Mutex;

/// Writes one newline-delimited JSON line per event to standard output.
pub struct StdoutOutput {
    name: String,
    writer: Mutex<BufWriter<Stdout>>,
}

impl StdoutOutput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            writer: Mutex::new(BufWriter::new(tokio::io::stdout())),
        }
    }
}

impl Output for StdoutOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn send(
        &self,
        event: Event,
    ) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async move {
            let mut line = event.to_text(false);
            line.push('\n');
            let mut writer = self.writer.lock().await;
            writer
                .write_all(line.as_bytes())
                .await
                .map_err(|e| OutputError::new(format!("stdout write failed: {e}")))?;
            writer
                .flush()
                .await
                .map_err(|e| OutputError::new(format!("stdout flush failed: {e}")))
        })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), OutputError>> + Send + '_>> {
        Box::pin(async move {
            let mut writer = self.writer.lock().await;
            writer
                .flush()
                .await
                .map_err(|e| OutputError::new(format!("stdout flush failed: {e}")))
        })
    }
}
