//! Error types and handling for the MCP server.
//!
//! Startup and serving failures surface as [`Error`]. Failures of individual
//! tool calls never do; they travel as `ToolError` inside the protocol
//! response.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The Firecrawl client could not be built.
    #[error("Firecrawl error: {0}")]
    Firecrawl(#[from] crate::domains::firecrawl::FirecrawlError),

    /// The HTTP listener failed to bind or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
