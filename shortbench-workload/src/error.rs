//! Workload error types

use shortbench_http::ApiError;
use thiserror::Error;

/// Errors that abort a replay run before or during setup
///
/// Individual request failures during the run are recorded in the
/// statistics instead of being raised here.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Building an API client for a virtual user failed
    #[error("Failed to build API client: {0}")]
    Client(#[from] ApiError),

    /// The replay has no dataset to sample from
    #[error("Cannot replay against an empty dataset")]
    EmptyDataset,
}
