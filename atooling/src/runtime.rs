//! Tool runtime trait and the chain-driven default executor.

use std::sync::Arc;

use aprovider::{ToolCall, ToolDefinition};

use crate::{
    MiddlewareChain, ToolError, ToolExecutionContext, ToolFuture, ToolHandler, ToolInvocation,
    ToolOutcome, ToolRegistry, ToolResultFuture,
};

pub trait ToolRuntime: Send + Sync {
    fn definitions(&self) -> Vec<ToolDefinition>;

    fn execute<'a>(
        &'a self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolOutcome, ToolError>>;
}

/// Runs each call through its middleware chain into the registry.
#[derive(Clone, Default)]
pub struct DefaultToolRuntime {
    registry: Arc<ToolRegistry>,
    chain: MiddlewareChain,
}

impl DefaultToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self::with_middleware(registry, MiddlewareChain::empty())
    }

    pub fn with_middleware(registry: Arc<ToolRegistry>, chain: MiddlewareChain) -> Self {
        Self { registry, chain }
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn chain(&self) -> &MiddlewareChain {
        &self.chain
    }

    pub fn execute_invocation<'a>(&'a self, invocation: ToolInvocation) -> ToolResultFuture<'a> {
        Box::pin(async move {
            let terminal = RegistryHandler {
                registry: &self.registry,
            };
            self.chain.run(invocation, &terminal).await
        })
    }
}

impl std::fmt::Debug for DefaultToolRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultToolRuntime")
            .field("registry", &self.registry)
            .field("chain", &self.chain)
            .finish()
    }
}

impl ToolRuntime for DefaultToolRuntime {
    fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    fn execute<'a>(
        &'a self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolOutcome, ToolError>> {
        self.execute_invocation(ToolInvocation::from_call(&tool_call, context))
    }
}

/// Lookup, then schema validation, then the tool body.
struct RegistryHandler<'r> {
    registry: &'r ToolRegistry,
}

impl ToolHandler for RegistryHandler<'_> {
    fn call<'a>(&'a self, invocation: ToolInvocation) -> ToolResultFuture<'a> {
        Box::pin(async move {
            let tool = self.registry.get(&invocation.tool_name).ok_or_else(|| {
                ToolError::not_found(format!(
                    "tool '{}' is not registered",
                    invocation.tool_name
                ))
                .for_invocation(&invocation)
            })?;

            let args = tool
                .schema()
                .validate(&invocation.arguments)
                .map_err(|error| error.for_invocation(&invocation))?;

            let output = tool
                .invoke(args, &invocation.context)
                .await
                .map_err(|error| error.for_invocation(&invocation))?;

            Ok(ToolOutcome::success(
                invocation.call_id,
                invocation.tool_name,
                output,
            ))
        })
    }
}
