//! The batch runner: semaphore-gated dispatch, index-keyed collection

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::error::BatchError;
use crate::types::{InputProducer, RemoteOperation, WorkItem, WorkResult};

/// Configuration for one batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of operations in flight at once
    pub concurrency: usize,

    /// Emit a progress line every this many completions
    pub progress_interval: Option<usize>,

    /// Per-operation timeout applied around each remote call
    ///
    /// `None` leaves timeouts to the operation itself.
    pub operation_timeout: Option<Duration>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: 16,
            progress_interval: Some(25),
            operation_timeout: None,
        }
    }
}

/// Executes batches of independent remote operations
///
/// Guarantees, in order of importance:
/// - at most `concurrency` operations in flight at any instant;
/// - result placement strictly by submission index, never arrival order;
/// - the first failure aborts the batch: no queued operation starts after
///   the failure is signaled, in-flight operations run to completion, and
///   the caller receives the first error with its index and input;
/// - each index is executed at most once.
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    /// Create a runner with the given configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Execute `total` operations, returning the index-ordered results
    ///
    /// Position `i` of the result holds the output of
    /// `operation.execute(producer.produce(i))`. On any failure the whole
    /// batch fails and no results are returned.
    pub async fn run<P, O>(
        &self,
        total: usize,
        producer: &P,
        operation: Arc<O>,
    ) -> Result<Vec<WorkResult<P::Input, O::Output>>, BatchError<O::Error>>
    where
        P: InputProducer,
        P::Input: fmt::Display + Send + Sync + 'static,
        O: RemoteOperation<Input = P::Input> + 'static,
        O::Output: 'static,
    {
        // A zero-capacity semaphore would park the first acquire forever
        if self.config.concurrency == 0 {
            return Err(BatchError::Internal(
                "concurrency must be at least 1".to_string(),
            ));
        }

        info!(
            total,
            concurrency = self.config.concurrency,
            "Starting batch run"
        );

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));
        let failed = Arc::new(AtomicBool::new(false));
        let first_error: Arc<Mutex<Option<BatchError<O::Error>>>> = Arc::new(Mutex::new(None));
        let completed = Arc::new(AtomicUsize::new(0));
        let progress_interval = self.config.progress_interval.filter(|every| *every > 0);
        let operation_timeout = self.config.operation_timeout;

        let mut workers: JoinSet<Option<WorkResult<P::Input, O::Output>>> = JoinSet::new();

        for index in 0..total {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| BatchError::Internal(format!("semaphore closed: {e}")))?;

            // Checked after acquisition: a permit freed by the failing
            // worker must never admit new work past the failure.
            if failed.load(Ordering::SeqCst) {
                debug!(index, "Failure signaled; not admitting queued work");
                drop(permit);
                break;
            }

            let item = WorkItem {
                index,
                input: producer.produce(index),
            };
            let operation = operation.clone();
            let failed = failed.clone();
            let first_error = first_error.clone();
            let completed = completed.clone();

            workers.spawn(async move {
                let _permit = permit;

                let outcome = match operation_timeout {
                    Some(limit) => {
                        match tokio::time::timeout(limit, operation.execute(&item.input)).await {
                            Ok(result) => result.map_err(|source| BatchError::Operation {
                                index: item.index,
                                input: item.input.to_string(),
                                source,
                            }),
                            Err(_) => Err(BatchError::Timeout {
                                index: item.index,
                                input: item.input.to_string(),
                                timeout: limit,
                            }),
                        }
                    }
                    None => {
                        operation
                            .execute(&item.input)
                            .await
                            .map_err(|source| BatchError::Operation {
                                index: item.index,
                                input: item.input.to_string(),
                                source,
                            })
                    }
                };

                match outcome {
                    Ok(output) => {
                        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        if let Some(every) = progress_interval {
                            if done % every == 0 {
                                info!(completed = done, total, "Batch progress");
                            }
                        }
                        Some(WorkResult {
                            index: item.index,
                            input: item.input,
                            output,
                        })
                    }
                    Err(error) => {
                        // First failure wins; later ones are only logged
                        if failed.swap(true, Ordering::SeqCst) {
                            warn!(index = item.index, error = %error, "Additional failure after batch already failing");
                        } else if let Ok(mut slot) = first_error.lock() {
                            *slot = Some(error);
                        }
                        None
                    }
                }
            });
        }

        // Collection: arrival order is unconstrained, placement is by index
        let mut slots: Vec<Option<WorkResult<P::Input, O::Output>>> =
            (0..total).map(|_| None).collect();

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(Some(result)) => {
                    let index = result.index;
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(result);
                    }
                }
                Ok(None) => {}
                Err(join_error) => {
                    if !failed.swap(true, Ordering::SeqCst) {
                        if let Ok(mut slot) = first_error.lock() {
                            *slot = Some(BatchError::Join(join_error.to_string()));
                        }
                    }
                }
            }
        }

        if failed.load(Ordering::SeqCst) {
            let stored = match first_error.lock() {
                Ok(mut guard) => guard.take(),
                Err(_) => None,
            };
            return Err(stored.unwrap_or_else(|| {
                BatchError::Internal("failure signaled but no error recorded".to_string())
            }));
        }

        let mut results = Vec::with_capacity(total);
        for (index, slot) in slots.into_iter().enumerate() {
            results.push(slot.ok_or_else(|| {
                BatchError::Internal(format!("missing result for item {index}"))
            })?);
        }

        info!(total, "Batch run complete");
        Ok(results)
    }
}
