//! Tool definitions module.
//!
//! This module exports all available tool definitions and registers them.
//! Each tool is defined in its own file for better maintainability.

pub mod common;
pub mod firecrawl;
pub mod math;

pub use firecrawl::{FirecrawlScrapeTool, FirecrawlSearchTool, ScrapeParams, SearchParams};
pub use math::{AddParams, AddTool, CalculateParams, CalculateTool, Operation};

use std::sync::Arc;
use std::time::Duration;

use super::{ToolDescriptor, ToolError, ToolRegistry};
use crate::domains::firecrawl::ContentService;

/// Shared dependencies handed to tools at registration time.
#[derive(Clone)]
pub struct ToolContext {
    /// Remote content service shared by all Firecrawl tools.
    pub content: Arc<dyn ContentService>,

    /// Bound on each remote call.
    pub remote_timeout: Duration,
}

/// Register every tool into `registry`.
pub fn register_default_tools(
    registry: &mut ToolRegistry,
    ctx: &ToolContext,
) -> Result<(), ToolError> {
    registry.register(ToolDescriptor::of(AddTool))?;
    registry.register(ToolDescriptor::of(CalculateTool))?;
    registry.register(ToolDescriptor::of(FirecrawlScrapeTool::new(ctx)))?;
    registry.register(ToolDescriptor::of(FirecrawlSearchTool::new(ctx)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::firecrawl::testing::MockContentService;
    use super::*;

    #[test]
    fn test_register_default_tools() {
        let ctx = ToolContext {
            content: Arc::new(MockContentService::unconfigured()),
            remote_timeout: Duration::from_secs(30),
        };
        let mut registry = ToolRegistry::new();
        register_default_tools(&mut registry, &ctx).unwrap();

        assert_eq!(
            registry.names(),
            vec!["add", "calculate", "firecrawl_scrape", "firecrawl_search"]
        );

        // A second pass must clash rather than silently duplicate.
        let err = register_default_tools(&mut registry, &ctx).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(_)));
        assert_eq!(registry.len(), 4);
    }
}
