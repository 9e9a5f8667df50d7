//! Firecrawl scrape tool definition.
//!
//! Only markdown and links are rendered into output blocks. Other formats are
//! accepted and forwarded to Firecrawl but produce no content of their own.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::{call_remote, require_credential};
use crate::domains::firecrawl::{ContentService, RemoteScrapeResult, ScrapeFormat};
use crate::domains::tools::definitions::ToolContext;
use crate::domains::tools::definitions::common::{check_url, null_as_default};
use crate::domains::tools::{ContentBlock, ToolCallResult, ToolDefinition, ToolError, ToolParams};

const UNKNOWN_SCRAPE_ERROR: &str = "Unknown error during scraping execution on Firecrawl";
const LINKS_HEADER: &str = "Links found on page:";

/// Parameters for the scrape tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScrapeParams {
    /// The URL to scrape.
    pub url: String,

    /// Output formats to request (default: markdown).
    #[serde(default, deserialize_with = "null_as_default")]
    pub formats: Vec<ScrapeFormat>,
}

impl ToolParams for ScrapeParams {
    fn validate(&self) -> Result<(), ToolError> {
        check_url("url", &self.url)
    }
}

impl ScrapeParams {
    /// Requested formats with duplicates removed, or markdown when none were given.
    pub fn effective_formats(&self) -> Vec<ScrapeFormat> {
        let mut formats: Vec<ScrapeFormat> = Vec::with_capacity(self.formats.len());
        for format in &self.formats {
            if !formats.contains(format) {
                formats.push(*format);
            }
        }
        if formats.is_empty() {
            formats.push(ScrapeFormat::Markdown);
        }
        formats
    }
}

/// Scrape a single page through Firecrawl.
pub struct FirecrawlScrapeTool {
    service: Arc<dyn ContentService>,
    timeout: Duration,
}

impl FirecrawlScrapeTool {
    pub fn new(ctx: &ToolContext) -> Self {
        Self {
            service: ctx.content.clone(),
            timeout: ctx.remote_timeout,
        }
    }

    /// Build output blocks for the requested formats, markdown first.
    fn render(result: RemoteScrapeResult, formats: &[ScrapeFormat]) -> Vec<ContentBlock> {
        let mut blocks = Vec::new();

        if formats.contains(&ScrapeFormat::Markdown) {
            if let Some(markdown) = result.markdown.filter(|m| !m.is_empty()) {
                blocks.push(ContentBlock::text(markdown));
            }
        }

        if formats.contains(&ScrapeFormat::Links) {
            if let Some(links) = result.links.filter(|l| !l.is_empty()) {
                let mut text = String::from(LINKS_HEADER);
                for link in &links {
                    text.push_str("\n- ");
                    text.push_str(link);
                }
                blocks.push(ContentBlock::text(text));
            }
        }

        blocks
    }
}

#[async_trait]
impl ToolDefinition for FirecrawlScrapeTool {
    const NAME: &'static str = "firecrawl_scrape";
    const DESCRIPTION: &'static str = "Scrape a single web page with Firecrawl. \
        Returns the page as markdown and/or the list of links found on it \
        (formats: markdown, links; other formats are requested but not rendered).";
    type Params = ScrapeParams;

    #[instrument(skip_all, fields(url = %params.url))]
    async fn execute(&self, params: ScrapeParams) -> Result<ToolCallResult, ToolError> {
        require_credential(self.service.as_ref(), Self::NAME)?;

        let formats = params.effective_formats();
        info!("Scraping URL: {} (formats: {:?})", params.url, formats);

        let result = call_remote(
            self.timeout,
            "scrape",
            self.service.scrape(&params.url, &formats),
        )
        .await?;

        if !result.success {
            let reason = result
                .error
                .as_deref()
                .filter(|e| !e.is_empty())
                .unwrap_or(UNKNOWN_SCRAPE_ERROR);
            warn!("Firecrawl scrape failed for {}: {}", params.url, reason);
            return Err(ToolError::remote(format!("Firecrawl scrape failed: {reason}")));
        }

        ToolCallResult::from_blocks(Self::render(result, &formats)).ok_or_else(|| {
            warn!("Firecrawl scrape of {} produced no usable content", params.url);
            ToolError::empty_result(format!(
                "Firecrawl scrape succeeded but returned no requested content for {} (formats: {})",
                params.url,
                formats
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
    }
}
