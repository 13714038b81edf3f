//! Configuration loading and environment variable handling

use crate::domains::BenchConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use std::time::Duration;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "SHORTBENCH".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<BenchConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: BenchConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<BenchConfig> {
        let mut config = BenchConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<BenchConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut BenchConfig) -> ConfigResult<()> {
        if let Ok(base_url) = self.get_env_var("TARGET_URL") {
            config.target.base_url = base_url;
        }

        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            config.http.timeout = Duration::from_secs(self.parse_var("HTTP_TIMEOUT", &timeout)?);
        }

        if let Ok(count) = self.get_env_var("DATASET_COUNT") {
            config.dataset.count = self.parse_var("DATASET_COUNT", &count)?;
        }

        if let Ok(concurrency) = self.get_env_var("DATASET_CONCURRENCY") {
            config.dataset.concurrency = self.parse_var("DATASET_CONCURRENCY", &concurrency)?;
        }

        if let Ok(users) = self.get_env_var("WORKLOAD_USERS") {
            config.workload.users = self.parse_var("WORKLOAD_USERS", &users)?;
        }

        if let Ok(duration) = self.get_env_var("WORKLOAD_DURATION") {
            config.workload.duration =
                Duration::from_secs(self.parse_var("WORKLOAD_DURATION", &duration)?);
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }

    /// Parse an environment variable value, reporting the variable on failure
    fn parse_var<T: std::str::FromStr>(&self, name: &str, value: &str) -> ConfigResult<T>
    where
        T::Err: std::fmt::Display,
    {
        value.parse().map_err(|e| {
            ConfigError::EnvError(format!("Invalid {}_{}: {}", self.prefix, name, e))
        })
    }
}
