//! Tool registry for lookup by tool name.
//!
//! The registry is assembled mutably and then shared behind an `Arc`; there is
//! no way to replace or remove a tool once it is registered.

use std::future::Future;
use std::sync::Arc;

use acommon::Registry;
use aprovider::ToolDefinition;

use crate::{FunctionTool, Tool, ToolArgs, ToolError, ToolExecutionContext, ToolSchema};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T) -> Result<(), ToolError>
    where
        T: Tool + 'static,
    {
        let name = tool.name().to_string();
        if name.trim().is_empty() {
            return Err(ToolError::invalid_arguments("tool name must not be empty"));
        }
        if self.tools.contains_key(&name) {
            return Err(ToolError::invalid_arguments(format!(
                "tool '{name}' is already registered"
            ))
            .with_tool_name(name));
        }

        self.tools.insert(name, Arc::new(tool));
        Ok(())
    }

    pub fn register_fn<F, Fut>(&mut self, schema: ToolSchema, handler: F) -> Result<(), ToolError>
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(schema, handler))
    }

    pub fn register_sync_fn<F>(&mut self, schema: ToolSchema, handler: F) -> Result<(), ToolError>
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        self.register(FunctionTool::from_sync(schema, handler))
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Descriptors in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParameterSpec, ToolErrorKind};

    fn echo_schema(name: &str) -> ToolSchema {
        ToolSchema::new(name, "Echoes text").parameter(ParameterSpec::string("text", "Text"))
    }

    #[test]
    fn registry_tracks_tools_in_registration_order() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry
            .register_sync_fn(echo_schema("multiply"), |_args, _ctx| Ok(String::new()))
            .expect("register multiply");
        registry
            .register_sync_fn(echo_schema("add"), |_args, _ctx| Ok(String::new()))
            .expect("register add");

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("add"));
        assert_eq!(registry.names(), vec!["multiply", "add"]);
        assert_eq!(registry.definitions()[1].name, "add");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = ToolRegistry::new();
        registry
            .register_sync_fn(echo_schema("echo"), |_args, _ctx| Ok("first".to_string()))
            .expect("first registration");

        let error = registry
            .register_sync_fn(echo_schema("echo"), |_args, _ctx| Ok("second".to_string()))
            .expect_err("duplicate must fail");

        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
        assert!(error.message.contains("echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut registry = ToolRegistry::new();
        let error = registry
            .register_sync_fn(echo_schema("  "), |_args, _ctx| Ok(String::new()))
            .expect_err("blank name must fail");
        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
    }
}
