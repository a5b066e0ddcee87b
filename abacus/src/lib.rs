//! Tool-calling arithmetic agent built on the abacus workspace crates.
//!
//! This crate re-exports the workspace crates and adds the pieces specific to
//! the demo: the four tools, the default middleware chain, the toy workflow,
//! configuration, and the CLI.
//!
//! ```rust
//! use abacus::runtime::default_tool_runtime;
//! use abacus::{ToolCall, ToolExecutionContext, ToolRuntime};
//!
//! # let runtime = tokio::runtime::Builder::new_current_thread().build().expect("runtime");
//! # runtime.block_on(async {
//! let tools = default_tool_runtime().expect("demo tools register");
//! let outcome = tools
//!     .execute(
//!         ToolCall::new("call_1", "multiply", r#"{"a": 3, "b": 7}"#),
//!         ToolExecutionContext::new("session-1"),
//!     )
//!     .await
//!     .expect("outcome");
//! assert_eq!(outcome.content, "21");
//! # });
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod prelude;
pub mod repl;
pub mod runtime;
pub mod tools;
pub mod workflow;

pub use achat;
pub use acommon;
pub use agraph;
pub use aobserve;
pub use aprovider;
pub use atooling;

pub use achat::{
    ChatError, ChatErrorKind, ChatPolicy, ChatService, ChatServiceBuilder, ChatSession,
    ChatTurnRequest, ChatTurnResult, ConversationStore, InMemoryConversationStore,
};
pub use acommon::{BoxFuture, CallId, SessionId, TraceId};
pub use agraph::{
    BranchDecider, CoinFlip, CompiledGraph, END, GraphError, GraphErrorKind, GraphRun,
    ScriptedDecider, StateGraph,
};
pub use aobserve::{
    MetricsObservabilityHooks, SafeGraphHooks, SafeToolHooks, StandardObservabilityHooks,
    TracingObservabilityHooks,
};
pub use aprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, Role, StopReason, TokenUsage,
};
pub use atooling::{
    DefaultToolRuntime, ErrorTranslationMiddleware, LoggingMiddleware, MiddlewareChain, Next,
    OutcomeStatus, ParameterSpec, Tool, ToolCall, ToolDefinition, ToolError, ToolErrorKind,
    ToolExecutionContext, ToolInvocation, ToolMiddleware, ToolOutcome, ToolRegistry, ToolRuntime,
    ToolRuntimeHooks, ToolSchema,
};

pub use config::{AgentConfig, ConfigError, ConfigErrorKind};
pub use error::{AppError, AppErrorKind};
pub use repl::{ReplSummary, run_repl};
pub use runtime::{
    build_provider, chat_service, chat_session, default_tool_chain, default_tool_runtime,
    observed_tool_chain,
};
pub use tools::demo_registry;
pub use workflow::{WorkflowState, build_workflow};
