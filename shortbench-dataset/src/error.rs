//! Dataset error types

use shortbench_batch::BatchError;
use shortbench_http::ApiError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from dataset generation, writing, and loading
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The generation batch failed; no files were written
    #[error("Dataset generation failed: {0}")]
    Batch(#[from] BatchError<ApiError>),

    /// Filesystem error while writing or reading dataset files
    #[error("Dataset IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The two dataset files do not pair up line for line
    #[error("Dataset files disagree: {urls} urls vs {aliases} aliases")]
    LineCountMismatch { urls: usize, aliases: usize },

    /// A dataset file exists but holds no entries
    #[error("Dataset file {path} is empty")]
    Empty { path: PathBuf },
}
