//! Typed API client for the URL-shortener service under test
//!
//! Wraps `reqwest` with the endpoints the harness exercises: shortening,
//! redirect lookup, session auth, link management, and unlock flows. Each
//! client instance carries its own cookie store, so one client corresponds
//! to one user session.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

pub use client::ShortenerClient;
pub use config::ClientConfig;
pub use errors::ApiError;
pub use types::{Credentials, LinkItem, ShortenRequest};
