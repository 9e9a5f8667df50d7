//! Tool-specific error types.

use rmcp::ErrorData as McpError;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur during tool registration or invocation.
///
/// These are call failures. The one result-level error (division by zero)
/// is a [`ToolCallResult::Error`](super::ToolCallResult::Error) instead.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    UnknownTool(String),

    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// An argument failed validation.
    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    /// A required credential is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote service failed, timed out, or reported failure.
    #[error("Remote service error: {0}")]
    RemoteService(String),

    /// The remote call succeeded but produced nothing usable.
    #[error("{0}")]
    EmptyResult(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    /// Create a new "invalid argument" error for `field`.
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new remote service error.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::RemoteService(msg.into())
    }

    /// Create a new "empty result" error.
    pub fn empty_result(msg: impl Into<String>) -> Self {
        Self::EmptyResult(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable machine-readable kind, reported to clients alongside the message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool(_) => "unknown_tool",
            Self::DuplicateTool(_) => "duplicate_tool",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Configuration(_) => "configuration_error",
            Self::RemoteService(_) => "remote_service_error",
            Self::EmptyResult(_) => "empty_result",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Whether the caller sent a bad request, as opposed to the call failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownTool(_) | Self::InvalidArgument { .. })
    }

    /// Convert into the rmcp protocol error.
    pub fn to_mcp_error(&self) -> McpError {
        let data = Some(json!({ "kind": self.kind() }));
        if self.is_client_error() {
            McpError::invalid_params(self.to_string(), data)
        } else {
            McpError::internal_error(self.to_string(), data)
        }
    }
}

impl From<ToolError> for McpError {
    fn from(err: ToolError) -> Self {
        err.to_mcp_error()
    }
}
