//! The remote operation driven by the generation batch

use async_trait::async_trait;
use shortbench_batch::RemoteOperation;
use shortbench_http::{ApiError, ShortenRequest, ShortenerClient};

/// Shortens one URL per batch item
#[derive(Debug, Clone)]
pub struct ShortenOperation {
    client: ShortenerClient,
}

impl ShortenOperation {
    pub fn new(client: ShortenerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteOperation for ShortenOperation {
    type Input = String;
    type Output = String;
    type Error = ApiError;

    async fn execute(&self, input: &String) -> Result<String, ApiError> {
        self.client.shorten(&ShortenRequest::new(input.clone())).await
    }
}
