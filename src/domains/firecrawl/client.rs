//! Firecrawl HTTP client.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::error::FirecrawlError;
use super::types::{RemoteScrapeResult, RemoteSearchResult, ScrapeFormat};
use crate::core::config::{ApiKey, FirecrawlConfig};

const CONNECT_TIMEOUT_SECS: u64 = 5;
const SCRAPE_PATH: &str = "/v1/scrape";
const SEARCH_PATH: &str = "/v1/search";
/// Cap on how much of a non-JSON error body ends up in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;
/// Largest response body read from the service.
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Remote content-extraction service as seen by the tools.
///
/// Implementations must be safe to share across concurrent tool calls.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Whether a credential is configured. Tools check this before calling out.
    fn is_configured(&self) -> bool;

    /// Scrape a single page in the requested formats.
    async fn scrape(
        &self,
        url: &str,
        formats: &[ScrapeFormat],
    ) -> Result<RemoteScrapeResult, FirecrawlError>;

    /// Run a web search.
    async fn search(&self, query: &str) -> Result<RemoteSearchResult, FirecrawlError>;
}

/// Firecrawl API client.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct FirecrawlClient {
    http: reqwest::Client,
    base_url: String,
    api_key: ApiKey,
    max_body_bytes: usize,
}

impl FirecrawlClient {
    /// Build a client from configuration. A missing key is not an error.
    pub fn new(config: &FirecrawlConfig) -> Result<Self, FirecrawlError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(config.timeout())
            .build()
            .map_err(FirecrawlError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    /// Override the response body size limit.
    pub fn with_max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Read the body, giving up once it exceeds the size limit.
    async fn read_body(&self, mut response: reqwest::Response) -> Result<Vec<u8>, FirecrawlError> {
        let limit = self.max_body_bytes;
        if response.content_length().is_some_and(|len| len > limit as u64) {
            return Err(FirecrawlError::BodyTooLarge { limit });
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > limit {
                return Err(FirecrawlError::BodyTooLarge { limit });
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    /// POST a JSON body and return the parsed JSON object.
    ///
    /// Error statuses that still carry a JSON object (Firecrawl reports
    /// `{"success": false, "error": ...}` this way) are returned as bodies.
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, FirecrawlError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = self.api_key.expose() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = self.read_body(response).await?;

        debug!("Firecrawl {} answered {} ({} bytes)", path, status, bytes.len());

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) if value.is_object() => {
                if !status.is_success() {
                    warn!("Firecrawl {} returned HTTP {}", path, status);
                }
                Ok(value)
            }
            _ if !status.is_success() => Err(FirecrawlError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes)
                    .chars()
                    .take(MAX_ERROR_BODY_CHARS)
                    .collect(),
            }),
            _ => Err(FirecrawlError::invalid_response(
                "expected a JSON object in response body",
            )),
        }
    }
}

#[async_trait]
impl ContentService for FirecrawlClient {
    fn is_configured(&self) -> bool {
        !self.api_key.is_missing()
    }

    #[instrument(skip(self, formats), fields(formats = formats.len()))]
    async fn scrape(
        &self,
        url: &str,
        formats: &[ScrapeFormat],
    ) -> Result<RemoteScrapeResult, FirecrawlError> {
        let body = json!({ "url": url, "formats": formats });
        let value = self.post_json(SCRAPE_PATH, body).await?;
        Ok(RemoteScrapeResult::from_value(&value))
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<RemoteSearchResult, FirecrawlError> {
        let value = self.post_json(SEARCH_PATH, json!({ "query": query })).await?;
        Ok(RemoteSearchResult::from_value(&value))
    }
}
