//! Calculator tool definition.
//!
//! Division by zero is reported inside the result (`invalid_argument`), not
//! as a call failure. Clients rely on that difference.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::format_number;
use crate::domains::tools::{ToolCallResult, ToolDefinition, ToolError, ToolParams};

/// Arithmetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

/// Parameters for the calculate tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CalculateParams {
    /// Operation to apply.
    pub operation: Operation,

    /// Left operand.
    pub a: f64,

    /// Right operand.
    pub b: f64,
}

impl ToolParams for CalculateParams {}

/// Apply one of four arithmetic operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculateTool;

#[async_trait]
impl ToolDefinition for CalculateTool {
    const NAME: &'static str = "calculate";
    const DESCRIPTION: &'static str = "Apply add, subtract, multiply or divide to two numbers. \
        Division by zero returns a result with an 'invalid_argument' error.";
    type Params = CalculateParams;

    #[instrument(skip_all, fields(operation = ?params.operation))]
    async fn execute(&self, params: CalculateParams) -> Result<ToolCallResult, ToolError> {
        let CalculateParams { operation, a, b } = params;

        let value = match operation {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => {
                if b == 0.0 {
                    info!("Rejected division by zero");
                    return Ok(ToolCallResult::error(
                        "invalid_argument",
                        "Cannot divide by zero",
                    ));
                }
                a / b
            }
        };

        Ok(ToolCallResult::text(format_number(value)))
    }
}
