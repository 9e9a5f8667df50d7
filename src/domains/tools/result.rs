//! Tool call results.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Value, json};

/// One unit of tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// The text of this block.
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text { text } => text,
        }
    }
}

/// Error carried inside a result rather than raised as a call failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolResultError {
    pub code: String,
    pub message: String,
}

/// Outcome of a tool call that did not fail.
///
/// `Success` always holds at least one block; use [`ToolCallResult::text`] or
/// [`ToolCallResult::from_blocks`] to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCallResult {
    Success(Vec<ContentBlock>),
    Error(ToolResultError),
}

impl ToolCallResult {
    /// Success with a single text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Success(vec![ContentBlock::text(text)])
    }

    /// Success with the given blocks, or `None` when there are none.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Option<Self> {
        if blocks.is_empty() {
            None
        } else {
            Some(Self::Success(blocks))
        }
    }

    /// Result-level error.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error(ToolResultError {
            code: code.into(),
            message: message.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Content blocks; empty for result-level errors.
    pub fn content(&self) -> &[ContentBlock] {
        match self {
            Self::Success(blocks) => blocks,
            Self::Error(_) => &[],
        }
    }

    /// JSON shape returned by the direct transport.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success(blocks) => json!({ "content": blocks }),
            Self::Error(error) => json!({
                "content": [],
                "error": error,
                "isError": true
            }),
        }
    }

    /// Convert into the rmcp result used by the streaming transport.
    ///
    /// rmcp has no dedicated error field, so the structured error travels in
    /// `structuredContent` next to a readable text block.
    pub fn into_call_tool_result(self) -> CallToolResult {
        match self {
            Self::Success(blocks) => CallToolResult::success(
                blocks
                    .into_iter()
                    .map(|block| match block {
                        ContentBlock::Text { text } => Content::text(text),
                    })
                    .collect(),
            ),
            Self::Error(error) => {
                let mut result = CallToolResult::error(vec![Content::text(error.message.clone())]);
                result.structured_content = Some(json!({ "error": error }));
                result
            }
        }
    }
}
