//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` is the protocol-facing handler. It never owns tools itself:
//! every call resolves the shared [`ToolSession`] through the session
//! directory, so the streaming transport (which clones the server once per
//! protocol session) and the direct transport all reach the same registry.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error::Result;
use crate::domains::firecrawl::{ContentService, FirecrawlClient};
use crate::domains::tools::{
    SessionDirectory, ToolCallResult, ToolDescriptor, ToolError, ToolSession,
};

const INSTRUCTIONS: &str = "Tools: add and calculate for arithmetic, firecrawl_scrape to fetch \
    a page as markdown or links, firecrawl_search for web search.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Sessions by logical name; every transport uses the shared one.
    sessions: Arc<SessionDirectory>,
}

impl McpServer {
    /// Create a new MCP server backed by the Firecrawl API.
    ///
    /// Succeeds without a Firecrawl credential; only the Firecrawl tools
    /// fail, at call time.
    pub fn new(config: Config) -> Result<Self> {
        let client = FirecrawlClient::new(&config.firecrawl)?;
        Ok(Self::with_content_service(config, Arc::new(client)))
    }

    /// Create a server backed by an arbitrary content service.
    pub fn with_content_service(config: Config, content: Arc<dyn ContentService>) -> Self {
        let sessions = Arc::new(SessionDirectory::new(content, config.firecrawl.timeout()));
        Self {
            config: Arc::new(config),
            sessions,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// The session shared by all transports and callers.
    pub fn session(&self) -> Arc<ToolSession> {
        self.sessions.shared()
    }

    /// Describe all tools, initializing the session if needed.
    pub async fn list_tool_descriptors(&self) -> std::result::Result<Vec<ToolDescriptor>, ToolError> {
        self.session().list_tools().await
    }

    /// Call a tool by name on the shared session.
    pub async fn invoke_tool(
        &self,
        name: &str,
        arguments: &JsonObject,
    ) -> std::result::Result<ToolCallResult, ToolError> {
        self.session().invoke(name, arguments).await
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name().to_string(),
                version: self.version().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        info!("Listing tools");
        let tools = self
            .list_tool_descriptors()
            .await?
            .iter()
            .map(ToolDescriptor::to_tool)
            .collect();
        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        info!("Calling tool: {}", request.name);
        let arguments = request.arguments.unwrap_or_default();
        let result = self.invoke_tool(&request.name, &arguments).await?;
        Ok(result.into_call_tool_result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::firecrawl::testing::MockContentService;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::with_content_service(
            Config::default(),
            Arc::new(MockContentService::unconfigured()),
        )
    }

    #[test]
    fn test_new_without_credential() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.name(), "firecrawl-mcp-server");
        assert!(!server.session().is_initialized());
    }

    #[tokio::test]
    async fn test_clones_share_session() {
        let server = server();
        let clone = server.clone();
        assert!(Arc::ptr_eq(&server.session(), &clone.session()));

        let args = json!({ "a": 2, "b": 3 }).as_object().cloned().unwrap();
        let result = clone.invoke_tool("add", &args).await.unwrap();
        assert_eq!(result, ToolCallResult::text("5"));
        assert!(server.session().is_initialized());
    }

    #[tokio::test]
    async fn test_list_tool_descriptors() {
        let descriptors = server().list_tool_descriptors().await.unwrap();
        assert_eq!(descriptors.len(), 4);
    }

    #[test]
    fn test_get_info_enables_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("firecrawl_scrape"));
        assert_eq!(info.server_info.name, "firecrawl-mcp-server");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
    }
}
