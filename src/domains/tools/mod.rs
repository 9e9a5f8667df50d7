//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `handlers.rs` - Tool traits and the type-erased descriptor
//! - `registry.rs` - Name to handler lookup and invocation
//! - `session.rs` - Lazily initialized session owning the registry
//! - `result.rs` - Tool call results and content blocks
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a params struct implementing
//!    `ToolParams` and a tool implementing `ToolDefinition`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `register_default_tools()`
//!
//! Both transports pick it up from the session; no transport code changes.

pub mod definitions;
mod error;
mod handlers;
mod registry;
mod result;
pub mod session;

pub use error::ToolError;
pub use handlers::{ToolDefinition, ToolDescriptor, ToolHandler, ToolParams};
pub use registry::ToolRegistry;
pub use result::{ContentBlock, ToolCallResult, ToolResultError};
pub use session::{SHARED_SESSION, SessionDirectory, ToolSession};
