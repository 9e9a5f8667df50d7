//! Firecrawl search tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::{call_remote, require_credential};
use crate::domains::firecrawl::ContentService;
use crate::domains::tools::definitions::ToolContext;
use crate::domains::tools::{ToolCallResult, ToolDefinition, ToolError, ToolParams};

/// Parameters for the search tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The search query.
    pub query: String,
}

impl ToolParams for SearchParams {}

/// Search the web through Firecrawl.
pub struct FirecrawlSearchTool {
    service: Arc<dyn ContentService>,
    timeout: Duration,
}

impl FirecrawlSearchTool {
    pub fn new(ctx: &ToolContext) -> Self {
        Self {
            service: ctx.content.clone(),
            timeout: ctx.remote_timeout,
        }
    }
}

#[async_trait]
impl ToolDefinition for FirecrawlSearchTool {
    const NAME: &'static str = "firecrawl_search";
    const DESCRIPTION: &'static str = "Search the web with Firecrawl. \
        Returns the raw result list (url, title, description) as indented JSON.";
    type Params = SearchParams;

    #[instrument(skip_all, fields(query = %params.query))]
    async fn execute(&self, params: SearchParams) -> Result<ToolCallResult, ToolError> {
        require_credential(self.service.as_ref(), Self::NAME)?;

        info!("Searching with Firecrawl: {}", params.query);

        let result = call_remote(self.timeout, "search", self.service.search(&params.query)).await?;

        if !result.success {
            let reason = result.error.as_deref().unwrap_or("no error message");
            warn!("Firecrawl search failed for {:?}: {}", params.query, reason);
            return Err(ToolError::remote(format!(
                "Firecrawl search failed or returned empty/unexpected results for query: {} ({})",
                params.query, reason
            )));
        }

        match result.data {
            Some(data) if !data.is_empty() => {
                info!("Firecrawl search returned {} result(s)", data.len());
                let text = serde_json::to_string_pretty(&data)
                    .map_err(|e| ToolError::internal(format!("Failed to serialize results: {e}")))?;
                Ok(ToolCallResult::text(text))
            }
            _ => {
                warn!("Firecrawl search returned no results for {:?}", params.query);
                Err(ToolError::empty_result(format!(
                    "Firecrawl search failed or returned empty/unexpected results for query: {}",
                    params.query
                )))
            }
        }
    }
}
