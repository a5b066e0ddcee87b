//! Observability hooks for tool invocations and workflow steps.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use aobserve::{SafeToolHooks, StandardObservabilityHooks};
//! use atooling::LoggingMiddleware;
//!
//! let _logging = LoggingMiddleware::new(Arc::new(SafeToolHooks::new(
//!     StandardObservabilityHooks::new(),
//! )));
//! ```

mod metrics_hooks;
mod safe_hooks;
mod standard;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeGraphHooks, SafeToolHooks};
pub use standard::StandardObservabilityHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeGraphHooks, SafeToolHooks, StandardObservabilityHooks,
        TracingObservabilityHooks,
    };
}
