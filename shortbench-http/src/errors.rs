//! API client error types

use reqwest::StatusCode;

/// Error type for calls against the shortener service
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status from {endpoint}: expected {expected}, got {got}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        expected: StatusCode,
        got: StatusCode,
        body: String,
    },

    #[error("Invalid response body from {endpoint}: {message}")]
    InvalidBody { endpoint: String, message: String },

    #[error("Redirect response for alias '{alias}' is missing the Location header")]
    MissingLocation { alias: String },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Build an unexpected-status error, keeping only a short body excerpt
    pub(crate) fn unexpected_status(
        endpoint: impl Into<String>,
        expected: StatusCode,
        got: StatusCode,
        body: &str,
    ) -> Self {
        const MAX_BODY_EXCERPT: usize = 200;

        let mut excerpt = body.to_string();
        if excerpt.len() > MAX_BODY_EXCERPT {
            // Cut on a char boundary so truncation cannot panic
            let cut = (0..=MAX_BODY_EXCERPT)
                .rev()
                .find(|i| excerpt.is_char_boundary(*i))
                .unwrap_or(0);
            excerpt.truncate(cut);
            excerpt.push_str("...");
        }

        ApiError::UnexpectedStatus {
            endpoint: endpoint.into(),
            expected,
            got,
            body: excerpt,
        }
    }
}
