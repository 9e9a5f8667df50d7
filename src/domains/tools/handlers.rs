//! Tool handler traits and descriptors.
//!
//! Each tool is a [`ToolDefinition`] with a typed parameter struct. Wrapping
//! it in a [`ToolDescriptor`] erases the parameter type so the registry can
//! hold heterogeneous tools; the erased handler validates the raw argument
//! object into the typed parameters before the tool runs.

use async_trait::async_trait;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::definitions::common::parse_arguments;
use super::error::ToolError;
use super::result::ToolCallResult;

/// Typed tool parameters, deserialized from a raw JSON argument object.
pub trait ToolParams: DeserializeOwned + JsonSchema + Send + Sized + 'static {
    /// Checks that go beyond the parameter types.
    fn validate(&self) -> Result<(), ToolError> {
        Ok(())
    }

    /// Deserialize and validate parameters. Errors name the offending field.
    fn from_arguments(arguments: &JsonObject) -> Result<Self, ToolError> {
        let params: Self = parse_arguments(arguments)?;
        params.validate()?;
        Ok(params)
    }
}

/// A tool with a fixed name, description and parameter type.
#[async_trait]
pub trait ToolDefinition: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    type Params: ToolParams;

    /// Run the tool on validated parameters.
    async fn execute(&self, params: Self::Params) -> Result<ToolCallResult, ToolError>;
}

/// Type-erased tool handler stored in the registry.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Validate `arguments` and run the tool.
    async fn call(&self, arguments: &JsonObject) -> Result<ToolCallResult, ToolError>;
}

struct Validating<T>(T);

#[async_trait]
impl<T: ToolDefinition> ToolHandler for Validating<T> {
    async fn call(&self, arguments: &JsonObject) -> Result<ToolCallResult, ToolError> {
        let params = T::Params::from_arguments(arguments)?;
        self.0.execute(params).await
    }
}

/// A registered tool: metadata plus handler.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: &'static str,
    description: &'static str,
    input_schema: Arc<JsonObject>,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    /// Describe `tool`, deriving the input schema from its parameter type.
    pub fn of<T: ToolDefinition>(tool: T) -> Self {
        Self {
            name: T::NAME,
            description: T::DESCRIPTION,
            input_schema: cached_schema_for_type::<T::Params>(),
            handler: Arc::new(Validating(tool)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_schema(&self) -> &Arc<JsonObject> {
        &self.input_schema
    }

    /// Validate arguments and invoke the handler.
    pub async fn call(&self, arguments: &JsonObject) -> Result<ToolCallResult, ToolError> {
        self.handler.call(arguments).await
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Tool metadata as JSON, for the direct transport.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema.as_ref()
        })
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
