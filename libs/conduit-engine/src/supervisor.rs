use std::sync::Arc;

use conduit_api::{Filter, Input, Output};

use crate::error::EngineError;
use crate::worker::{RunningWorker, Worker};

/// Spawns `num_workers` workers sharing the same input/filter/output plugin
/// instances and stops them together on shutdown.
pub struct Supervisor {
    workers: Vec<RunningWorker>,
}

impl Supervisor {
    /// Construct and start `num_workers` workers, each wired to the same
    /// shared plugin instances, each with its own pair of bounded channels.
    pub fn start(
        num_workers: usize,
        inputs: Vec<Arc<dyn Input>>,
        filters: Vec<Arc<dyn Filter>>,
        outputs: Vec<Arc<dyn Output>>,
        backlog: usize,
    ) -> Self {
        let workers = (0..num_workers)
            .map(|_| Worker::new(inputs.clone(), filters.clone(), outputs.clone(), backlog).start())
            .collect();
        Self { workers }
    }

    /// Stop every worker, returning the first error encountered across all
    /// of them. Every worker is still given the chance to shut down even
    /// after an earlier one fails.
    pub async fn stop(self) -> Result<(), EngineError> {
        let mut first_err = None;
        for worker in self.workers {
            if let Err(e) = worker.stop().await {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
