//! Batch execution error types

use std::time::Duration;
use thiserror::Error;

/// Error type for a failed batch
///
/// The whole batch fails atomically: the first operation failure wins and
/// is surfaced with the index and input that caused it. Later failures are
/// logged, not propagated.
#[derive(Debug, Error)]
pub enum BatchError<E: std::error::Error + 'static> {
    /// A single remote operation failed
    #[error("Operation for item {index} failed (input: {input}): {source}")]
    Operation {
        index: usize,
        input: String,
        #[source]
        source: E,
    },

    /// A single remote operation exceeded its timeout
    #[error("Operation for item {index} timed out after {timeout:?} (input: {input})")]
    Timeout {
        index: usize,
        input: String,
        timeout: Duration,
    },

    /// A worker task panicked or was aborted
    #[error("Worker task failed: {0}")]
    Join(String),

    /// Internal bookkeeping error in the runner
    #[error("Batch runner internal error: {0}")]
    Internal(String),
}

impl<E: std::error::Error + 'static> BatchError<E> {
    /// Submission index of the failing item, when one is known
    pub fn index(&self) -> Option<usize> {
        match self {
            BatchError::Operation { index, .. } | BatchError::Timeout { index, .. } => Some(*index),
            BatchError::Join(_) | BatchError::Internal(_) => None,
        }
    }
}
