//! Interception chain wrapped around every tool invocation.
//!
//! A [`MiddlewareChain`] is an ordered list of [`ToolMiddleware`] links in front
//! of a terminal [`ToolHandler`]. The first link is outermost: it sees the
//! invocation first and the outcome last. Each link receives a [`Next`]
//! continuation that it may run at most once.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use atooling::{
//!     ErrorTranslationMiddleware, LoggingMiddleware, MiddlewareChain, NoopToolRuntimeHooks,
//! };
//!
//! let chain = MiddlewareChain::builder()
//!     .with(LoggingMiddleware::new(Arc::new(NoopToolRuntimeHooks)))
//!     .with(ErrorTranslationMiddleware::new())
//!     .build();
//!
//! assert_eq!(chain.names(), vec!["logging", "error_translation"]);
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;

use crate::{ToolError, ToolFuture, ToolInvocation, ToolOutcome, ToolRuntimeHooks};

pub type ToolResultFuture<'a> = ToolFuture<'a, Result<ToolOutcome, ToolError>>;

/// Innermost handler that actually performs the call.
pub trait ToolHandler: Send + Sync {
    fn call<'a>(&'a self, invocation: ToolInvocation) -> ToolResultFuture<'a>;
}

pub trait ToolMiddleware: Send + Sync {
    fn name(&self) -> &str;

    fn handle<'a>(&'a self, invocation: ToolInvocation, next: Next<'a>) -> ToolResultFuture<'a>;
}

/// Remainder of the chain after the current link.
///
/// Running it consumes it. Dropping it without running short-circuits every
/// inner link and the terminal handler.
pub struct Next<'a> {
    links: &'a [Arc<dyn ToolMiddleware>],
    terminal: &'a dyn ToolHandler,
}

impl<'a> Next<'a> {
    pub fn run(self, invocation: ToolInvocation) -> ToolResultFuture<'a> {
        match self.links.split_first() {
            Some((link, rest)) => link.handle(
                invocation,
                Next {
                    links: rest,
                    terminal: self.terminal,
                },
            ),
            None => self.terminal.call(invocation),
        }
    }
}

#[derive(Clone, Default)]
pub struct MiddlewareChain {
    links: Vec<Arc<dyn ToolMiddleware>>,
}

impl MiddlewareChain {
    pub fn builder() -> MiddlewareChainBuilder {
        MiddlewareChainBuilder::default()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.links.iter().map(|link| link.name()).collect()
    }

    pub fn run<'a>(
        &'a self,
        invocation: ToolInvocation,
        terminal: &'a dyn ToolHandler,
    ) -> ToolResultFuture<'a> {
        Next {
            links: &self.links,
            terminal,
        }
        .run(invocation)
    }
}

impl std::fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("links", &self.names())
            .finish()
    }
}

#[derive(Default)]
pub struct MiddlewareChainBuilder {
    links: Vec<Arc<dyn ToolMiddleware>>,
}

impl MiddlewareChainBuilder {
    pub fn with<M>(mut self, link: M) -> Self
    where
        M: ToolMiddleware + 'static,
    {
        self.links.push(Arc::new(link));
        self
    }

    pub fn with_shared(mut self, link: Arc<dyn ToolMiddleware>) -> Self {
        self.links.push(link);
        self
    }

    pub fn build(self) -> MiddlewareChain {
        MiddlewareChain { links: self.links }
    }
}

pub const DEFAULT_TRANSLATION_PREFIX: &str = "Tool error: Please check your input and try again.";

/// Converts every failure from deeper in the chain into a substitute outcome.
///
/// Both `Err` results and panics are caught. The substitute keeps the
/// invocation's call id so the model can match it to its request.
#[derive(Debug, Clone)]
pub struct ErrorTranslationMiddleware {
    prefix: String,
}

impl ErrorTranslationMiddleware {
    pub fn new() -> Self {
        Self {
            prefix: DEFAULT_TRANSLATION_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn render(&self, failure: &str) -> String {
        format!("{} ({failure})", self.prefix)
    }
}

impl Default for ErrorTranslationMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolMiddleware for ErrorTranslationMiddleware {
    fn name(&self) -> &str {
        "error_translation"
    }

    fn handle<'a>(&'a self, invocation: ToolInvocation, next: Next<'a>) -> ToolResultFuture<'a> {
        Box::pin(async move {
            let call_id = invocation.call_id.clone();
            let tool_name = invocation.tool_name.clone();

            // Inner links and the handler may panic before returning a future.
            let guarded = AssertUnwindSafe(async move { next.run(invocation).await });
            let failure = match guarded.catch_unwind().await {
                Ok(Ok(outcome)) => return Ok(outcome),
                Ok(Err(error)) => error.to_string(),
                Err(payload) => panic_text(payload.as_ref()),
            };

            Ok(ToolOutcome::substitute(
                call_id,
                tool_name,
                self.render(&failure),
            ))
        })
    }
}

fn panic_text(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        return format!("panic: {text}");
    }
    if let Some(text) = payload.downcast_ref::<String>() {
        return format!("panic: {text}");
    }
    "panic: tool panicked".to_string()
}

/// Reports one start and one finish notification per invocation.
#[derive(Clone)]
pub struct LoggingMiddleware {
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl LoggingMiddleware {
    pub fn new(hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        Self { hooks }
    }
}

impl std::fmt::Debug for LoggingMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingMiddleware").finish_non_exhaustive()
    }
}

impl ToolMiddleware for LoggingMiddleware {
    fn name(&self) -> &str {
        "logging"
    }

    fn handle<'a>(&'a self, invocation: ToolInvocation, next: Next<'a>) -> ToolResultFuture<'a> {
        Box::pin(async move {
            let snapshot = invocation.clone();
            self.hooks.on_execution_start(&snapshot);

            let started = Instant::now();
            let result = next.run(invocation).await;
            let elapsed = started.elapsed();

            match &result {
                Ok(outcome) => self.hooks.on_execution_success(&snapshot, outcome, elapsed),
                Err(error) => self.hooks.on_execution_failure(&snapshot, error, elapsed),
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::{OutcomeStatus, ToolExecutionContext};

    struct Echo;

    impl ToolHandler for Echo {
        fn call<'a>(&'a self, invocation: ToolInvocation) -> ToolResultFuture<'a> {
            Box::pin(async move {
                Ok(ToolOutcome::success(
                    invocation.call_id,
                    invocation.tool_name,
                    invocation.arguments.to_string(),
                ))
            })
        }
    }

    struct Failing;

    impl ToolHandler for Failing {
        fn call<'a>(&'a self, invocation: ToolInvocation) -> ToolResultFuture<'a> {
            Box::pin(async move {
                Err(ToolError::execution("Cannot divide by zero").for_invocation(&invocation))
            })
        }
    }

    struct Panicking;

    impl ToolHandler for Panicking {
        fn call<'a>(&'a self, invocation: ToolInvocation) -> ToolResultFuture<'a> {
            Box::pin(async move {
                let values: Vec<f64> = Vec::new();
                let index = invocation.arguments.as_object().map_or(0, |args| args.len());
                let first = values[index];
                Ok(ToolOutcome::success(
                    invocation.call_id,
                    invocation.tool_name,
                    first.to_string(),
                ))
            })
        }
    }

    /// Fails while building its future, before anything is awaited.
    struct EagerDivider;

    impl ToolHandler for EagerDivider {
        fn call<'a>(&'a self, invocation: ToolInvocation) -> ToolResultFuture<'a> {
            let divisor = invocation.arguments["b"].as_i64().unwrap_or_default();
            let quotient = 1 / divisor;
            Box::pin(async move {
                Ok(ToolOutcome::success(
                    invocation.call_id,
                    invocation.tool_name,
                    quotient.to_string(),
                ))
            })
        }
    }

    struct EagerGuard;

    impl ToolMiddleware for EagerGuard {
        fn name(&self) -> &str {
            "eager_guard"
        }

        fn handle<'a>(
            &'a self,
            invocation: ToolInvocation,
            next: Next<'a>,
        ) -> ToolResultFuture<'a> {
            if invocation.arguments["b"] == json!(0) {
                panic!("guard rejected a zero divisor");
            }
            next.run(invocation)
        }
    }

    struct ShortCircuit;

    impl ToolMiddleware for ShortCircuit {
        fn name(&self) -> &str {
            "short_circuit"
        }

        fn handle<'a>(
            &'a self,
            invocation: ToolInvocation,
            _next: Next<'a>,
        ) -> ToolResultFuture<'a> {
            Box::pin(async move {
                Ok(ToolOutcome::success(
                    invocation.call_id,
                    invocation.tool_name,
                    "cached",
                ))
            })
        }
    }

    #[derive(Default)]
    struct CountingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ToolRuntimeHooks for CountingHooks {
        fn on_execution_start(&self, invocation: &ToolInvocation) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{}", invocation.call_id));
        }

        fn on_execution_success(
            &self,
            _invocation: &ToolInvocation,
            outcome: &ToolOutcome,
            _elapsed: std::time::Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{:?}", outcome.status));
        }

        fn on_execution_failure(
            &self,
            _invocation: &ToolInvocation,
            error: &ToolError,
            _elapsed: std::time::Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{:?}", error.kind));
        }
    }

    fn invocation(call_id: &str) -> ToolInvocation {
        ToolInvocation::new(
            call_id,
            "divide",
            json!({"a": 1, "b": 0}),
            ToolExecutionContext::new("session-1"),
        )
    }

    #[tokio::test]
    async fn empty_chain_calls_terminal_directly() {
        let chain = MiddlewareChain::empty();
        let outcome = chain
            .run(invocation("call_1"), &Echo)
            .await
            .expect("echo succeeds");

        assert_eq!(outcome.call_id.as_str(), "call_1");
        assert_eq!(outcome.content, r#"{"a":1,"b":0}"#);
    }

    #[tokio::test]
    async fn translation_converts_errors_into_substitutes_with_same_call_id() {
        let chain = MiddlewareChain::builder()
            .with(ErrorTranslationMiddleware::new())
            .build();

        let outcome = chain
            .run(invocation("call_7"), &Failing)
            .await
            .expect("translation never returns Err");

        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.call_id.as_str(), "call_7");
        assert!(outcome.content.starts_with(DEFAULT_TRANSLATION_PREFIX));
        assert!(outcome.content.contains("Cannot divide by zero"));
    }

    #[tokio::test]
    async fn translation_catches_panics_from_deeper_in_the_chain() {
        let chain = MiddlewareChain::builder()
            .with(ErrorTranslationMiddleware::new())
            .build();

        let outcome = chain
            .run(invocation("call_8"), &Panicking)
            .await
            .expect("panic is translated");

        assert!(outcome.is_substitute());
        assert_eq!(outcome.call_id.as_str(), "call_8");
        assert!(outcome.content.contains("index out of bounds"));
    }

    #[tokio::test]
    async fn translation_catches_panics_raised_before_the_handler_future_exists() {
        let chain = MiddlewareChain::builder()
            .with(ErrorTranslationMiddleware::new())
            .build();

        let outcome = chain
            .run(invocation("call_9"), &EagerDivider)
            .await
            .expect("eager panic is translated");

        assert!(outcome.is_substitute());
        assert_eq!(outcome.call_id.as_str(), "call_9");
        assert!(outcome.content.contains("divide by zero"));
    }

    #[tokio::test]
    async fn translation_catches_panics_raised_synchronously_by_inner_links() {
        let chain = MiddlewareChain::builder()
            .with(ErrorTranslationMiddleware::new())
            .with(EagerGuard)
            .build();

        let outcome = chain
            .run(invocation("call_10"), &Echo)
            .await
            .expect("link panic is translated");

        assert!(outcome.is_substitute());
        assert_eq!(outcome.call_id.as_str(), "call_10");
        assert!(outcome.content.contains("guard rejected a zero divisor"));
    }

    #[tokio::test]
    async fn translation_passes_successes_through_unchanged() {
        let chain = MiddlewareChain::builder()
            .with(ErrorTranslationMiddleware::new().with_prefix("Oops."))
            .build();

        let outcome = chain.run(invocation("call_2"), &Echo).await.expect("ok");
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert!(!outcome.content.starts_with("Oops."));
    }

    #[tokio::test]
    async fn logging_reports_exactly_one_start_and_one_finish() {
        let hooks = Arc::new(CountingHooks::default());
        let chain = MiddlewareChain::builder()
            .with(LoggingMiddleware::new(hooks.clone()))
            .with(ErrorTranslationMiddleware::new())
            .build();

        chain.run(invocation("call_3"), &Failing).await.expect("ok");
        chain.run(invocation("call_4"), &Echo).await.expect("ok");

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(
            events,
            vec![
                "start:call_3",
                "success:Error",
                "start:call_4",
                "success:Success",
            ]
        );
    }

    #[tokio::test]
    async fn logging_without_translation_reports_failures() {
        let hooks = Arc::new(CountingHooks::default());
        let chain = MiddlewareChain::builder()
            .with(LoggingMiddleware::new(hooks.clone()))
            .build();

        let error = chain
            .run(invocation("call_5"), &Failing)
            .await
            .expect_err("no translation link");
        assert_eq!(error.tool_call_id.as_ref().map(|id| id.as_str()), Some("call_5"));

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(events, vec!["start:call_5", "failure:Execution"]);
    }

    #[tokio::test]
    async fn dropping_next_short_circuits_inner_links() {
        let hooks = Arc::new(CountingHooks::default());
        let chain = MiddlewareChain::builder()
            .with(ShortCircuit)
            .with(LoggingMiddleware::new(hooks.clone()))
            .build();

        let outcome = chain.run(invocation("call_6"), &Failing).await.expect("ok");
        assert_eq!(outcome.content, "cached");
        assert!(hooks.events.lock().expect("events lock").is_empty());
    }
}
