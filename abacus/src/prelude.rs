//! Common imports for code driving the abacus agent.

pub use crate::{
    AgentConfig, AppError, BranchDecider, ChatService, ChatSession, ChatTurnRequest,
    ChatTurnResult, CoinFlip, DefaultToolRuntime, MiddlewareChain, ModelProvider, ToolCall,
    ToolError, ToolExecutionContext, ToolMiddleware, ToolOutcome, ToolRegistry, ToolRuntime,
    WorkflowState, build_provider, build_workflow, chat_service, chat_session, default_tool_chain,
    default_tool_runtime, demo_registry, run_repl,
};
