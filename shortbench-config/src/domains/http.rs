//! HTTP client configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_timeout"
    )]
    pub timeout: Duration,

    /// Connection timeout
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_connect_timeout"
    )]
    pub connect_timeout: Duration,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whether to verify SSL certificates
    #[serde(default = "crate::domains::utils::default_true")]
    pub verify_ssl: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
            user_agent: default_user_agent(),
            verify_ssl: true,
        }
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_user_agent() -> String {
    "shortbench/0.1".to_string()
}

impl Validatable for HttpConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.user_agent, "user_agent", self.domain_name())?;

        if self.timeout.is_zero() {
            return Err(self.validation_error("timeout must be greater than 0"));
        }
        if self.connect_timeout.is_zero() {
            return Err(self.validation_error("connect_timeout must be greater than 0"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_rejected() {
        let config = HttpConfig {
            timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_seconds_format() {
        let yaml = "timeout: 10\nconnect_timeout: 2\n";
        let config: HttpConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
    }
}
