//! Domain-specific configuration modules

pub mod dataset;
pub mod http;
pub mod logging;
pub mod target;
pub mod utils;
pub mod workload;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main shortbench configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BenchConfig {
    /// Target service configuration
    #[serde(default)]
    pub target: target::TargetConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: http::HttpConfig,

    /// Dataset generation configuration
    #[serde(default)]
    pub dataset: dataset::DatasetConfig,

    /// Workload replay configuration
    #[serde(default)]
    pub workload: workload::WorkloadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl BenchConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.target.validate()?;
        self.http.validate()?;
        self.dataset.validate()?;
        self.workload.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BenchConfig::default();
        assert!(config.validate_all().is_ok());
    }

    #[test]
    fn test_config_yaml_round_trip() {
        let config = BenchConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: BenchConfig = serde_yaml::from_str(&yaml).unwrap();
        assert!(parsed.validate_all().is_ok());
        assert_eq!(parsed.dataset.count, config.dataset.count);
    }
}
