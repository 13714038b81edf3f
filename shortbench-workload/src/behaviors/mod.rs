//! Virtual-user behaviors
//!
//! Each behavior models one kind of visitor. Request failures end the
//! current iteration early and are recorded in the statistics; the user
//! itself keeps running.

mod auth;
mod core;
mod unlock;

pub use auth::AuthUser;
pub use core::CoreUser;
pub use unlock::UnlockUser;

use crate::stats::StatsRecorder;
use async_trait::async_trait;
use shortbench_http::ApiError;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::debug;

/// One virtual user's behavior
#[async_trait]
pub trait UserBehavior: Send {
    /// Behavior name, for logs
    fn name(&self) -> &'static str;

    /// Run one task iteration
    async fn run_iteration(&mut self);

    /// Pause to apply after an iteration that took `iteration_elapsed`
    fn pause(&mut self, iteration_elapsed: Duration) -> Duration;
}

/// Await a request, recording its latency and outcome
///
/// Returns `None` on failure so callers can end the iteration early.
pub(crate) async fn observe<T, F>(
    stats: &StatsRecorder,
    endpoint: &str,
    success_status: u16,
    request: F,
) -> Option<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let start = Instant::now();
    match request.await {
        Ok(value) => {
            stats.record_success(endpoint, success_status, start.elapsed());
            Some(value)
        }
        Err(error) => {
            debug!(endpoint, error = %error, "Request failed");
            stats.record_failure(endpoint);
            None
        }
    }
}
