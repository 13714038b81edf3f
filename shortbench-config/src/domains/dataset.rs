//! Dataset generation configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the dataset generation phase
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Total number of (URL, alias) pairs to generate
    #[serde(default = "default_count")]
    pub count: usize,

    /// Maximum number of shorten requests in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Emit a progress line every this many completed requests (0 disables)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,

    /// File that receives the generated URLs, one per line
    #[serde(default = "default_urls_file")]
    pub urls_file: PathBuf,

    /// File that receives the returned aliases, one per line
    #[serde(default = "default_aliases_file")]
    pub aliases_file: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            concurrency: default_concurrency(),
            progress_interval: default_progress_interval(),
            urls_file: default_urls_file(),
            aliases_file: default_aliases_file(),
        }
    }
}

fn default_count() -> usize {
    10_000
}

fn default_concurrency() -> usize {
    16
}

fn default_progress_interval() -> usize {
    25
}

fn default_urls_file() -> PathBuf {
    PathBuf::from("data_urls.txt")
}

fn default_aliases_file() -> PathBuf {
    PathBuf::from("data_aliases.txt")
}

impl Validatable for DatasetConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.count as u64, "count", self.domain_name())?;
        validate_positive(self.concurrency as u64, "concurrency", self.domain_name())?;
        validate_required_string(
            &self.urls_file.to_string_lossy(),
            "urls_file",
            self.domain_name(),
        )?;
        validate_required_string(
            &self.aliases_file.to_string_lossy(),
            "aliases_file",
            self.domain_name(),
        )?;

        if self.urls_file == self.aliases_file {
            return Err(self.validation_error("urls_file and aliases_file must differ"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "dataset"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_count_rejected() {
        let config = DatasetConfig {
            count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_same_output_files_rejected() {
        let config = DatasetConfig {
            urls_file: PathBuf::from("data.txt"),
            aliases_file: PathBuf::from("data.txt"),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
