//! Domain-driven configuration for the shortbench harness
//!
//! Configuration is split by functional domain (target service, HTTP
//! client, dataset generation, workload replay, logging), with defaults,
//! validation, and `SHORTBENCH_*` environment variable overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    dataset::DatasetConfig, http::HttpConfig, logging::LoggingConfig, target::TargetConfig,
    workload::WorkloadConfig, BenchConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
