//! In-memory `ContentService` for tool tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::domains::firecrawl::{
    ContentService, FirecrawlError, RemoteScrapeResult, RemoteSearchResult, ScrapeFormat,
};

/// Canned-response service that counts calls and records requested formats.
#[derive(Default)]
pub struct MockContentService {
    configured: bool,
    scrape_result: Option<RemoteScrapeResult>,
    search_result: Option<RemoteSearchResult>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_formats: Mutex<Vec<ScrapeFormat>>,
}

impl MockContentService {
    /// A service with a credential and empty canned results.
    pub fn configured() -> Self {
        Self {
            configured: true,
            ..Default::default()
        }
    }

    /// A service without a credential.
    pub fn unconfigured() -> Self {
        Self::default()
    }

    pub fn with_scrape(mut self, result: RemoteScrapeResult) -> Self {
        self.scrape_result = Some(result);
        self
    }

    pub fn with_search(mut self, result: RemoteSearchResult) -> Self {
        self.search_result = Some(result);
        self
    }

    /// Sleep this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of remote calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Formats passed to the last scrape call.
    pub fn last_formats(&self) -> Vec<ScrapeFormat> {
        self.last_formats.lock().unwrap().clone()
    }

    async fn respond<T>(&self, canned: &Option<T>) -> Result<T, FirecrawlError>
    where
        T: Clone,
    {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        canned
            .clone()
            .ok_or_else(|| FirecrawlError::invalid_response("connection reset by peer"))
    }
}

#[async_trait]
impl ContentService for MockContentService {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn scrape(
        &self,
        _url: &str,
        formats: &[ScrapeFormat],
    ) -> Result<RemoteScrapeResult, FirecrawlError> {
        *self.last_formats.lock().unwrap() = formats.to_vec();
        self.respond(&self.scrape_result).await
    }

    async fn search(&self, _query: &str) -> Result<RemoteSearchResult, FirecrawlError> {
        self.respond(&self.search_result).await
    }
}
