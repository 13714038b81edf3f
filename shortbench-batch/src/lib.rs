//! Bounded-concurrency, index-ordered, fail-fast batch requester
//!
//! Executes N independent remote operations with at most W in flight,
//! collects results keyed by original submission index, and aborts the
//! whole batch on the first failure. Completion order is unconstrained;
//! the returned sequence is always ordered by submission index.
//!
//! Cancellation is cooperative and best-effort: once a failure is
//! signaled, no queued operation starts, but operations already in flight
//! run to completion.

pub mod error;
pub mod runner;
pub mod types;

pub use error::BatchError;
pub use runner::{BatchConfig, BatchRunner};
pub use types::{FnProducer, InputProducer, RemoteOperation, WorkItem, WorkResult};
