//! Wrappers that keep a panicking hook from unwinding into the caller.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use agraph::{GraphError, GraphRuntimeHooks};
use atooling::{ToolError, ToolInvocation, ToolOutcome, ToolRuntimeHooks};

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, invocation: &ToolInvocation) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_execution_start(invocation)));
    }

    fn on_execution_success(
        &self,
        invocation: &ToolInvocation,
        outcome: &ToolOutcome,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_success(invocation, outcome, elapsed)
        }));
    }

    fn on_execution_failure(
        &self,
        invocation: &ToolInvocation,
        error: &ToolError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_failure(invocation, error, elapsed)
        }));
    }
}

pub struct SafeGraphHooks<H> {
    inner: H,
}

impl<H> SafeGraphHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> GraphRuntimeHooks for SafeGraphHooks<H>
where
    H: GraphRuntimeHooks,
{
    fn on_step_start(&self, node: &str, step: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_step_start(node, step)));
    }

    fn on_step_success(&self, node: &str, step: usize, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_step_success(node, step, elapsed)
        }));
    }

    fn on_step_failure(&self, node: &str, step: usize, error: &GraphError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_step_failure(node, step, error, elapsed)
        }));
    }

    fn on_transition(&self, from: &str, to: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_transition(from, to)));
    }
}
