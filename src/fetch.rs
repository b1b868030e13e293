//! HTTP transport shared by every provider.
//!
//! One `reqwest` client, built once, carrying a fixed User-Agent so source
//! site operators can identify the crawler. Non-success statuses collapse
//! into [`FeedError::Transport`]; there is no retry, no caching, and no
//! timeout policy beyond the transport defaults.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::Result;

/// Thin wrapper around a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct SourceClient {
    client: Client,
}

impl SourceClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent(concat!("chapter-feeds/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// GET a source document as text.
    #[instrument(level = "debug", skip(self))]
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(url, bytes = body.len(), "Fetched source document");
        Ok(body)
    }

    /// POST a JSON body and return the response text.
    #[instrument(level = "debug", skip(self, body))]
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<String> {
        let response = self.client.post(url).json(body).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(url, bytes = body.len(), "Fetched API response");
        Ok(body)
    }
}

impl Default for SourceClient {
    fn default() -> Self {
        Self::new()
    }
}
