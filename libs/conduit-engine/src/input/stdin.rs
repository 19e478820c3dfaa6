use std::future::Future;
use std::pin::Pin;

use chrono::Utc;
use conduit_api::{Event, Input, InputError};
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Reads newline-delimited JSON event-data objects from standard input.
///
/// Unlike the line-wrapping original, each line is parsed as the `data`
/// mapping directly rather than stuffed under a single `message` key --
/// that keeps the plugin useful for feeding structured fixtures straight
/// into the pipeline instead of only raw text. A line that fails to parse
/// is a transient `InputError`: logged, the reader keeps going.
pub struct StdinInput {
    name: String,
    reader: Mutex<BufReader<Stdin>>,
}

impl StdinInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reader: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

impl Input for StdinInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn open(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }

    fn next(&self) -> Pin<Box<dyn Future<Output = Result<Event, InputError>> + Send + '_>> {
        Box::pin(async move {
            let mut reader = self.reader.lock().await;
            let mut line = String::new();
            let n = reader
                .read_line(&mut line)
                .await
                .map_err(|e| InputError::new(format!("stdin read failed: {e}")))?;
            if n == 0 {
                return Err(InputError::new("stdin reached end of input"));
            }
            let trimmed = line.trim_end_matches(['\n', '\r']);
            let data = Event::parse_data(trimmed)
                .map_err(|e| InputError::new(format!("invalid event data on stdin: {e}")))?;
            Ok(Event::new(Utc::now(), self.name.clone(), data))
        })
    }

    fn close(&self) -> Pin<Box<dyn Future<Output = Result<(), InputError>> + Send + '_>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_preserved() {
        let input = StdinInput::new("stdin-0");
        assert_eq!(input.name(), "stdin-0");
    }
}
