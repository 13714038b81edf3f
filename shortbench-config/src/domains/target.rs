//! Target service configuration

use crate::error::ConfigResult;
use crate::validation::{validate_url, Validatable};
use serde::{Deserialize, Serialize};

/// Configuration of the URL-shortener service under test
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL of the service, e.g. `http://localhost:3000`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Validatable for TargetConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.base_url, "base_url", self.domain_name())
    }

    fn domain_name(&self) -> &'static str {
        "target"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = TargetConfig {
            base_url: "::not-a-url::".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
