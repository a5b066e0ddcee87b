//! Metrics-based observability hooks for tool calls and workflow steps.
//!
//! ```rust
//! use aobserve::MetricsObservabilityHooks;
//! use atooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use agraph::{GraphError, GraphRuntimeHooks};
use atooling::{ToolError, ToolInvocation, ToolOutcome, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, invocation: &ToolInvocation) {
        metrics::counter!(
            "abacus_tool_execution_start_total",
            "tool_name" => invocation.tool_name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        invocation: &ToolInvocation,
        outcome: &ToolOutcome,
        elapsed: Duration,
    ) {
        let status = if outcome.is_substitute() {
            "substitute"
        } else {
            "success"
        };

        metrics::counter!(
            "abacus_tool_execution_finish_total",
            "tool_name" => invocation.tool_name.clone(),
            "status" => status
        )
        .increment(1);
        metrics::histogram!(
            "abacus_tool_execution_duration_seconds",
            "tool_name" => invocation.tool_name.clone(),
            "status" => status
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        invocation: &ToolInvocation,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "abacus_tool_execution_failure_total",
            "tool_name" => invocation.tool_name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "abacus_tool_execution_duration_seconds",
            "tool_name" => invocation.tool_name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl GraphRuntimeHooks for MetricsObservabilityHooks {
    fn on_step_success(&self, node: &str, _step: usize, elapsed: Duration) {
        metrics::counter!("abacus_graph_step_total", "node" => node.to_string()).increment(1);
        metrics::histogram!(
            "abacus_graph_step_duration_seconds",
            "node" => node.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_step_failure(&self, node: &str, _step: usize, error: &GraphError, _elapsed: Duration) {
        metrics::counter!(
            "abacus_graph_step_failure_total",
            "node" => node.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_transition(&self, from: &str, to: &str) {
        metrics::counter!(
            "abacus_graph_transition_total",
            "from" => from.to_string(),
            "to" => to.to_string()
        )
        .increment(1);
    }
}
