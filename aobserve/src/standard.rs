//! Tracing and metrics together, as installed by the abacus binary.

use std::time::Duration;

use agraph::{GraphError, GraphRuntimeHooks};
use atooling::{ToolError, ToolInvocation, ToolOutcome, ToolRuntimeHooks};

use crate::{MetricsObservabilityHooks, TracingObservabilityHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardObservabilityHooks {
    tracing: TracingObservabilityHooks,
    metrics: MetricsObservabilityHooks,
}

impl StandardObservabilityHooks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToolRuntimeHooks for StandardObservabilityHooks {
    fn on_execution_start(&self, invocation: &ToolInvocation) {
        self.tracing.on_execution_start(invocation);
        self.metrics.on_execution_start(invocation);
    }

    fn on_execution_success(
        &self,
        invocation: &ToolInvocation,
        outcome: &ToolOutcome,
        elapsed: Duration,
    ) {
        self.tracing.on_execution_success(invocation, outcome, elapsed);
        self.metrics.on_execution_success(invocation, outcome, elapsed);
    }

    fn on_execution_failure(
        &self,
        invocation: &ToolInvocation,
        error: &ToolError,
        elapsed: Duration,
    ) {
        self.tracing.on_execution_failure(invocation, error, elapsed);
        self.metrics.on_execution_failure(invocation, error, elapsed);
    }
}

impl GraphRuntimeHooks for StandardObservabilityHooks {
    fn on_step_start(&self, node: &str, step: usize) {
        self.tracing.on_step_start(node, step);
        self.metrics.on_step_start(node, step);
    }

    fn on_step_success(&self, node: &str, step: usize, elapsed: Duration) {
        self.tracing.on_step_success(node, step, elapsed);
        self.metrics.on_step_success(node, step, elapsed);
    }

    fn on_step_failure(&self, node: &str, step: usize, error: &GraphError, elapsed: Duration) {
        self.tracing.on_step_failure(node, step, error, elapsed);
        self.metrics.on_step_failure(node, step, error, elapsed);
    }

    fn on_transition(&self, from: &str, to: &str) {
        self.tracing.on_transition(from, to);
        self.metrics.on_transition(from, to);
    }
}
