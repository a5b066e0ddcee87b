//! Tool trait contract for registry-managed capabilities.
//!
//! ```rust
//! use atooling::{FunctionTool, ParameterSpec, Tool, ToolError, ToolSchema, required_f64};
//!
//! let tool = FunctionTool::new(
//!     ToolSchema::new("add", "Add two numbers")
//!         .parameter(ParameterSpec::number("a", "First addend"))
//!         .parameter(ParameterSpec::number("b", "Second addend")),
//!     |args, _ctx| async move {
//!         let sum = required_f64(&args, "a")? + required_f64(&args, "b")?;
//!         Ok::<_, ToolError>(sum.to_string())
//!     },
//! );
//!
//! assert_eq!(tool.definition().name, "add");
//! ```

use std::future::Future;
use std::sync::Arc;

use acommon::BoxFuture;
use aprovider::ToolDefinition;

use crate::{ToolArgs, ToolError, ToolExecutionContext, ToolSchema};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    fn schema(&self) -> &ToolSchema;

    /// Runs the tool body with arguments already checked against [`Tool::schema`].
    fn invoke<'a>(
        &'a self,
        args: ToolArgs,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>>;

    fn name(&self) -> &str {
        &self.schema().name
    }

    fn definition(&self) -> ToolDefinition {
        self.schema().definition()
    }
}

type ToolResult = Result<String, ToolError>;

type ToolHandler =
    dyn Fn(ToolArgs, ToolExecutionContext) -> ToolFuture<'static, ToolResult> + Send + Sync;

pub struct FunctionTool {
    schema: ToolSchema,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(schema: ToolSchema, handler: F) -> Self
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> =
            Arc::new(move |args, context| Box::pin(handler(args, context)));

        Self { schema, handler }
    }

    pub fn from_sync<F>(schema: ToolSchema, handler: F) -> Self
    where
        F: Fn(ToolArgs, ToolExecutionContext) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        Self::new(schema, move |args, context| {
            let output = handler(args, context);
            async move { output }
        })
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl Tool for FunctionTool {
    fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    fn invoke<'a>(
        &'a self,
        args: ToolArgs,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        (self.handler)(args, context.clone())
    }
}
