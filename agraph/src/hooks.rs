//! Runtime hook contracts for observing graph execution.
//!
//! ```rust
//! use agraph::{GraphRuntimeHooks, NoopGraphRuntimeHooks};
//!
//! fn accepts_hooks(_hooks: &dyn GraphRuntimeHooks) {}
//!
//! let hooks = NoopGraphRuntimeHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use crate::GraphError;

pub trait GraphRuntimeHooks: Send + Sync {
    fn on_step_start(&self, _node: &str, _step: usize) {}

    fn on_step_success(&self, _node: &str, _step: usize, _elapsed: Duration) {}

    fn on_step_failure(&self, _node: &str, _step: usize, _error: &GraphError, _elapsed: Duration) {}

    fn on_transition(&self, _from: &str, _to: &str) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopGraphRuntimeHooks;

impl GraphRuntimeHooks for NoopGraphRuntimeHooks {}
