//! Shortener API client implementation

use crate::config::ClientConfig;
use crate::errors::ApiError;
use crate::types::{
    Credentials, LinkItem, ShortenRequest, ShortenResponse, UnlockRequest, UnlockResponse,
};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;
use url::Url;

/// Client for the URL-shortener service under test
///
/// Each instance owns its own cookie store, so one client corresponds to
/// one user session. Redirects are never followed automatically; the 307
/// from the redirect endpoint is the response under measurement.
#[derive(Debug, Clone)]
pub struct ShortenerClient {
    http: Client,
    base_url: Url,
}

impl ShortenerClient {
    /// Create a new client for the service at `base_url`
    pub fn new(base_url: Url, config: &ClientConfig) -> Result<Self, ApiError> {
        debug!(
            base_url = %base_url,
            timeout_secs = config.timeout.as_secs(),
            "Creating shortener client"
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Parse `base_url` and create a client
    pub fn from_str(base_url: &str, config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(Url::parse(base_url)?, config)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Shorten a URL, returning the alias assigned by the service
    pub async fn shorten(&self, request: &ShortenRequest) -> Result<String, ApiError> {
        let url = self.endpoint("/api/shorten")?;
        let response = self.http.post(url).json(request).send().await?;
        let response = expect_status("/api/shorten", StatusCode::CREATED, response).await?;

        let body: ShortenResponse = decode_json("/api/shorten", response).await?;
        Ok(body.alias)
    }

    /// Look up an alias, returning the target of the 307 redirect
    pub async fn resolve(&self, alias: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("/r/{}", alias))?;
        let response = self.http.get(url).send().await?;
        let response = expect_status("/r/", StatusCode::TEMPORARY_REDIRECT, response).await?;

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::MissingLocation {
                alias: alias.to_string(),
            })?;

        Ok(location.to_string())
    }

    /// Check whether this client still has a live session
    ///
    /// A 401 means "no session" and is reported as `false`, not as an error.
    pub async fn session_alive(&self) -> Result<bool, ApiError> {
        let url = self.endpoint("/api/auth/me")?;
        let response = self.http.get(url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::unexpected_status(
                    "/api/auth/me",
                    StatusCode::OK,
                    status,
                    &body,
                ))
            }
        }
    }

    /// Register a new account, starting a session
    pub async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.authenticate("/api/auth/register", credentials).await
    }

    /// Log in to an existing account, starting a session
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        self.authenticate("/api/auth/login", credentials).await
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> Result<(), ApiError> {
        let url = self.endpoint(path)?;
        let response = self.http.post(url).json(credentials).send().await?;
        expect_status(path, StatusCode::OK, response).await?;
        Ok(())
    }

    /// List the authenticated user's links
    pub async fn list_links(&self) -> Result<Vec<LinkItem>, ApiError> {
        let url = self.endpoint("/api/user/list")?;
        let response = self.http.get(url).send().await?;
        let response = expect_status("/api/user/list", StatusCode::OK, response).await?;

        decode_json("/api/user/list", response).await
    }

    /// Delete one of the authenticated user's links
    pub async fn delete_link(&self, alias: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/user/link/{}", alias))?;
        let response = self.http.delete(url).send().await?;
        expect_status("/api/user/link", StatusCode::NO_CONTENT, response).await?;
        Ok(())
    }

    /// End the current session
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint("/api/user/logout")?;
        let response = self.http.post(url).send().await?;
        expect_status("/api/user/logout", StatusCode::NO_CONTENT, response).await?;
        Ok(())
    }

    /// Unlock a password-protected alias, returning the original URL
    pub async fn unlock(&self, alias: &str, password: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&format!("/api/unlock/{}", alias))?;
        let request = UnlockRequest {
            password: password.to_string(),
        };
        let response = self.http.post(url).json(&request).send().await?;
        let response = expect_status("/api/unlock/", StatusCode::OK, response).await?;

        let body: UnlockResponse = decode_json("/api/unlock/", response).await?;
        Ok(body.url)
    }
}

/// Fail with an `UnexpectedStatus` error unless the response has `expected`
async fn expect_status(
    endpoint: &str,
    expected: StatusCode,
    response: Response,
) -> Result<Response, ApiError> {
    let status = response.status();
    if status != expected {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::unexpected_status(endpoint, expected, status, &body));
    }
    Ok(response)
}

/// Decode a JSON body, mapping decode failures to `InvalidBody`
async fn decode_json<T: serde::de::DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<T, ApiError> {
    response.json().await.map_err(|e| {
        // A transport failure while reading the body is not a decode error
        if e.is_decode() {
            ApiError::InvalidBody {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        } else {
            ApiError::Network(e)
        }
    })
}
