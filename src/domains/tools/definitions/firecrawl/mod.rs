//! Firecrawl tools module.
//!
//! - `scrape`: fetch one page and render markdown and links
//! - `search`: web search, results returned as JSON
//!
//! Both tools check the credential before calling out and bound every remote
//! call with the session's timeout.

pub mod scrape;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use scrape::{FirecrawlScrapeTool, ScrapeParams};
pub use search::{FirecrawlSearchTool, SearchParams};

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::domains::firecrawl::{ContentService, FirecrawlError};
use crate::domains::tools::ToolError;

/// Fail with a configuration error when no credential is set.
fn require_credential(service: &dyn ContentService, tool: &str) -> Result<(), ToolError> {
    if service.is_configured() {
        Ok(())
    } else {
        warn!("{} called without FIRECRAWL_API_KEY", tool);
        Err(ToolError::configuration(format!(
            "FIRECRAWL_API_KEY is not configured; {tool} is unavailable"
        )))
    }
}

/// Run a remote call under `timeout`, mapping every failure to a remote error.
async fn call_remote<T>(
    timeout: Duration,
    operation: &str,
    call: impl Future<Output = Result<T, FirecrawlError>>,
) -> Result<T, ToolError> {
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            warn!("Firecrawl {} call failed: {}", operation, e);
            Err(ToolError::remote(format!("Firecrawl {operation} call failed: {e}")))
        }
        Err(_) => {
            warn!("Firecrawl {} call timed out after {:?}", operation, timeout);
            Err(ToolError::remote(format!(
                "Firecrawl {operation} call timed out after {}s",
                timeout.as_secs()
            )))
        }
    }
}
