//! Tool Registry - name to handler lookup and invocation.
//!
//! Registration is append-only and only happens while a
//! [`ToolSession`](super::ToolSession) initializes; afterwards the registry is
//! shared read-only between concurrent calls.

use rmcp::model::{JsonObject, Tool};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::error::ToolError;
use super::handlers::ToolDescriptor;
use super::result::ToolCallResult;

/// Registry of named tools.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, ToolDescriptor>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names are unique.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        let name = descriptor.name();
        if self.tools.contains_key(name) {
            return Err(ToolError::DuplicateTool(name.to_string()));
        }
        debug!("Registered tool: {}", name);
        self.tools.insert(name, descriptor);
        Ok(())
    }

    /// Validate arguments against the named tool and invoke it.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: &JsonObject,
    ) -> Result<ToolCallResult, ToolError> {
        let Some(descriptor) = self.tools.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::unknown_tool(name));
        };
        descriptor.call(arguments).await
    }

    /// Get a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// All tool names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.tools.keys().copied().collect()
    }

    /// All descriptors, sorted by name.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values()
    }

    /// All tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.descriptors().map(ToolDescriptor::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::AddTool;
    use serde_json::json;

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_register_duplicate() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolDescriptor::of(AddTool)).unwrap();

        let err = registry.register(ToolDescriptor::of(AddTool)).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateTool(ref name) if name == "add"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_unknown() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("unknown", &JsonObject::new()).await.unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }

    #[tokio::test]
    async fn test_invoke_validates_arguments() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolDescriptor::of(AddTool)).unwrap();

        let err = registry
            .invoke("add", &args(json!({ "a": 1 })))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument { ref field, .. } if field == "b"));

        let result = registry
            .invoke("add", &args(json!({ "a": 1, "b": 2 })))
            .await
            .unwrap();
        assert_eq!(result, ToolCallResult::text("3"));
    }

    #[test]
    fn test_tools_metadata() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolDescriptor::of(AddTool)).unwrap();
        let tools = registry.tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "add");
        assert!(registry.get("add").is_some());
        assert_eq!(registry.names(), vec!["add"]);
    }
}
