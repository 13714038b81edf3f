//! HTTP client configuration

use shortbench_config::domains::http::HttpConfig;
use std::time::Duration;

/// Client-side view of the HTTP configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// User agent string
    pub user_agent: String,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(5),
            user_agent: "shortbench/0.1".to_string(),
            verify_ssl: true,
        }
    }
}

impl From<HttpConfig> for ClientConfig {
    fn from(config: HttpConfig) -> Self {
        Self {
            timeout: config.timeout,
            connect_timeout: config.connect_timeout,
            user_agent: config.user_agent,
            verify_ssl: config.verify_ssl,
        }
    }
}
