//! Transport layer for the MCP server.
//!
//! A single HTTP listener serves two transports that share one tool session:
//! - **Streaming** (`/sse`): MCP streamable HTTP with server-sent events,
//!   provided by rmcp
//! - **Direct** (`/mcp`): JSON-RPC 2.0 over POST
//!
//! Any other path answers 404.

mod config;
mod error;
pub mod http;

pub use config::{DIRECT_PATH, HttpConfig, STREAMING_PATH};
pub use error::TransportError;
pub use http::{HttpTransport, build_router};
