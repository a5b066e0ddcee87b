//! Tool layer: schemas, registry, invocation records, and the middleware chain
//! every tool call passes through.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use atooling::{
//!     DefaultToolRuntime, ErrorTranslationMiddleware, MiddlewareChain, ParameterSpec,
//!     ToolError, ToolRegistry, ToolSchema, required_f64,
//! };
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(
//!         ToolSchema::new("divide", "Divide a by b")
//!             .parameter(ParameterSpec::number("a", "Dividend"))
//!             .parameter(ParameterSpec::number("b", "Divisor")),
//!         |args, _ctx| {
//!             let b = required_f64(&args, "b")?;
//!             if b == 0.0 {
//!                 return Err(ToolError::execution("Cannot divide by zero"));
//!             }
//!             Ok((required_f64(&args, "a")? / b).to_string())
//!         },
//!     )
//!     .expect("divide registers");
//!
//! let chain = MiddlewareChain::builder()
//!     .with(ErrorTranslationMiddleware::new())
//!     .build();
//! let runtime = DefaultToolRuntime::with_middleware(Arc::new(registry), chain);
//! assert_eq!(runtime.chain().len(), 1);
//! ```

mod args;
mod error;
mod hooks;
mod middleware;
mod registry;
mod runtime;
mod schema;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        DefaultToolRuntime, ErrorTranslationMiddleware, LoggingMiddleware, MiddlewareChain,
        Next, OutcomeStatus, ParameterSpec, Tool, ToolError, ToolErrorKind, ToolExecutionContext,
        ToolFuture, ToolInvocation, ToolMiddleware, ToolOutcome, ToolRegistry, ToolRuntime,
        ToolSchema,
    };
}

pub use aprovider::{ToolCall, ToolDefinition};
pub use args::{ToolArgs, parse_json_object, parse_json_value, required_f64, required_string};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use middleware::{
    DEFAULT_TRANSLATION_PREFIX, ErrorTranslationMiddleware, LoggingMiddleware, MiddlewareChain,
    MiddlewareChainBuilder, Next, ToolHandler, ToolMiddleware, ToolResultFuture,
};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use schema::{Constraint, ParameterKind, ParameterSpec, ToolSchema};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{OutcomeStatus, ToolExecutionContext, ToolInvocation, ToolOutcome};
