//! Request and response types for the shortener API

use serde::{Deserialize, Serialize};

/// Body of a `POST /api/shorten` request
#[derive(Debug, Clone, Serialize, Default)]
pub struct ShortenRequest {
    /// Original URL to shorten
    pub url: String,

    /// Optional custom alias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Optional password protecting the link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ShortenRequest {
    /// Plain shorten request for a URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            password: None,
        }
    }

    /// Shorten request for a password-protected link
    pub fn protected(url: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            password: Some(password.into()),
        }
    }
}

/// Body of a successful shorten response
#[derive(Debug, Clone, Deserialize)]
pub struct ShortenResponse {
    pub alias: String,
}

/// One entry of the authenticated user's link list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkItem {
    pub alias: String,
    pub url: String,
}

/// Username/password pair for register and login
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of a `POST /api/unlock/{alias}` request
#[derive(Debug, Clone, Serialize)]
pub struct UnlockRequest {
    pub password: String,
}

/// Body of a successful unlock response
#[derive(Debug, Clone, Deserialize)]
pub struct UnlockResponse {
    pub url: String,
}
