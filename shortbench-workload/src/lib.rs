//! Weighted virtual-user traffic replay
//!
//! Replays a realistic traffic mix against the shortener service: redirect
//! lookups and shortening (core), authenticated link management (auth),
//! and password-protected unlock flows. Users are apportioned across
//! behaviors by weight, run until the configured duration elapses, and
//! stop cooperatively at iteration boundaries. Request outcomes go into a
//! shared statistics recorder; failures are recorded, not fatal.

pub mod behaviors;
pub mod error;
pub mod pacing;
pub mod runner;
pub mod sampler;
pub mod stats;

pub use behaviors::{AuthUser, CoreUser, UnlockUser, UserBehavior};
pub use error::WorkloadError;
pub use pacing::WaitModel;
pub use runner::WorkloadRunner;
pub use stats::{StatsRecorder, WorkloadSummary};
