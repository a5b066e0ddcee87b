//! Tracing-based observability hooks for tool calls and workflow steps.
//!
//! ```rust
//! use agraph::GraphRuntimeHooks;
//! use aobserve::TracingObservabilityHooks;
//!
//! fn accepts_graph_hooks(_hooks: &dyn GraphRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_graph_hooks(&hooks);
//! ```

use std::time::Duration;

use agraph::{GraphError, GraphRuntimeHooks};
use atooling::{ToolError, ToolInvocation, ToolOutcome, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, invocation: &ToolInvocation) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = invocation.tool_name,
            tool_call_id = %invocation.call_id,
            arguments = %invocation.arguments,
            session_id = %invocation.context.session_id,
            trace_id = invocation.context.trace_id.as_ref().map(|id| id.as_str())
        );
    }

    fn on_execution_success(
        &self,
        invocation: &ToolInvocation,
        outcome: &ToolOutcome,
        elapsed: Duration,
    ) {
        if outcome.is_substitute() {
            tracing::warn!(
                phase = "tool",
                event = "execution_substituted",
                tool_name = invocation.tool_name,
                tool_call_id = %outcome.call_id,
                session_id = %invocation.context.session_id,
                elapsed_ms = elapsed.as_millis() as u64,
                content = outcome.content
            );
            return;
        }

        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = invocation.tool_name,
            tool_call_id = %outcome.call_id,
            session_id = %invocation.context.session_id,
            elapsed_ms = elapsed.as_millis() as u64,
            content = outcome.content
        );
    }

    fn on_execution_failure(
        &self,
        invocation: &ToolInvocation,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = invocation.tool_name,
            tool_call_id = %invocation.call_id,
            session_id = %invocation.context.session_id,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl GraphRuntimeHooks for TracingObservabilityHooks {
    fn on_step_start(&self, node: &str, step: usize) {
        tracing::debug!(phase = "graph", event = "step_start", node, step);
    }

    fn on_step_success(&self, node: &str, step: usize, elapsed: Duration) {
        tracing::info!(
            phase = "graph",
            event = "step_success",
            node,
            step,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_step_failure(&self, node: &str, step: usize, error: &GraphError, elapsed: Duration) {
        tracing::error!(
            phase = "graph",
            event = "step_failure",
            node,
            step,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            error = %error
        );
    }

    fn on_transition(&self, from: &str, to: &str) {
        tracing::debug!(phase = "graph", event = "transition", from, to);
    }
}
