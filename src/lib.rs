//! Firecrawl MCP Server Library
//!
//! A Model Context Protocol server exposing a small toolset: two arithmetic
//! tools and two tools backed by the Firecrawl web scraping API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server and HTTP transport
//! - **domains**: business logic organized by bounded contexts
//!   - **firecrawl**: remote content service client
//!   - **tools**: registry, shared session and tool definitions
//!
//! Tools live in a single shared session that registers them on first use,
//! exactly once, no matter how many requests race to trigger it.
//!
//! # Example
//!
//! ```rust,no_run
//! use firecrawl_mcp_server::core::{Config, HttpTransport, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     HttpTransport::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
