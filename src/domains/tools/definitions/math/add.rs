//! Addition tool definition.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::format_number;
use crate::domains::tools::{ToolCallResult, ToolDefinition, ToolError, ToolParams};

/// Parameters for the add tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddParams {
    /// First addend.
    pub a: f64,

    /// Second addend.
    pub b: f64,
}

impl ToolParams for AddParams {}

/// Add two numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddTool;

#[async_trait]
impl ToolDefinition for AddTool {
    const NAME: &'static str = "add";
    const DESCRIPTION: &'static str = "Add two numbers and return the sum.";
    type Params = AddParams;

    #[instrument(skip_all, name = "add")]
    async fn execute(&self, params: AddParams) -> Result<ToolCallResult, ToolError> {
        debug!("add({}, {})", params.a, params.b);
        Ok(ToolCallResult::text(format_number(params.a + params.b)))
    }
}
