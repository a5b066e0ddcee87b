use std::sync::{Arc, Mutex};
use std::time::Duration;

use abacus::runtime::default_tool_chain;
use abacus::tools::demo_registry;
use abacus::{
    DefaultToolRuntime, ToolCall, ToolError, ToolExecutionContext, ToolInvocation, ToolOutcome,
    ToolRuntime, ToolRuntimeHooks,
};

#[derive(Default)]
struct CountingHooks {
    starts: Mutex<Vec<String>>,
    finishes: Mutex<Vec<ToolOutcome>>,
    failures: Mutex<usize>,
}

impl ToolRuntimeHooks for CountingHooks {
    fn on_execution_start(&self, invocation: &ToolInvocation) {
        self.starts
            .lock()
            .expect("starts lock")
            .push(invocation.call_id.to_string());
    }

    fn on_execution_success(
        &self,
        _invocation: &ToolInvocation,
        outcome: &ToolOutcome,
        _elapsed: Duration,
    ) {
        self.finishes
            .lock()
            .expect("finishes lock")
            .push(outcome.clone());
    }

    fn on_execution_failure(
        &self,
        _invocation: &ToolInvocation,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
        *self.failures.lock().expect("failures lock") += 1;
    }
}

fn runtime_with(hooks: Arc<CountingHooks>) -> DefaultToolRuntime {
    DefaultToolRuntime::with_middleware(
        Arc::new(demo_registry().expect("demo tools register")),
        default_tool_chain(hooks),
    )
}

async fn call(runtime: &DefaultToolRuntime, id: &str, name: &str, args: &str) -> ToolOutcome {
    runtime
        .execute(
            ToolCall::new(id, name, args),
            ToolExecutionContext::new("session-1").with_trace_id("trace-1"),
        )
        .await
        .expect("default chain never returns Err")
}

#[tokio::test]
async fn arithmetic_tools_return_exact_results() {
    let runtime = runtime_with(Arc::new(CountingHooks::default()));

    let sum = call(&runtime, "c1", "add", r#"{"a":2.5,"b":-7}"#).await;
    assert_eq!(sum.content, "-4.5");
    assert!(!sum.is_substitute());

    let product = call(&runtime, "c2", "multiply", r#"{"a":"6","b":7}"#).await;
    assert_eq!(product.content, "42");

    let quotient = call(&runtime, "c3", "divide", r#"{"a":9,"b":4}"#).await;
    assert_eq!(quotient.content, "2.25");
}

#[tokio::test]
async fn every_simulated_error_becomes_a_distinct_substitute() {
    let runtime = runtime_with(Arc::new(CountingHooks::default()));

    let mut contents = Vec::new();
    for (index, category) in ["generic", "validation", "timeout", "network"].iter().enumerate() {
        let id = format!("sim_{index}");
        let outcome = call(
            &runtime,
            &id,
            "simulate_error",
            &format!(r#"{{"error_type":"{category}"}}"#),
        )
        .await;

        assert!(outcome.is_substitute());
        assert_eq!(outcome.call_id.as_str(), id);
        assert!(outcome.content.contains(category), "{}", outcome.content);
        contents.push(outcome.content);
    }

    contents.sort();
    contents.dedup();
    assert_eq!(contents.len(), 4);
}

#[tokio::test]
async fn lookup_and_schema_failures_are_translated_too() {
    let runtime = runtime_with(Arc::new(CountingHooks::default()));

    let unknown = call(&runtime, "c1", "sqrt", r#"{"x":4}"#).await;
    assert!(unknown.is_substitute());
    assert!(unknown.content.contains("sqrt"));

    let malformed = call(&runtime, "c2", "add", "{not json").await;
    assert!(malformed.is_substitute());

    let missing = call(&runtime, "c3", "divide", r#"{"a":1}"#).await;
    assert!(missing.content.contains("missing required parameter 'b'"));
}

#[tokio::test]
async fn logging_sees_one_start_and_one_finish_per_invocation() {
    let hooks = Arc::new(CountingHooks::default());
    let runtime = runtime_with(Arc::clone(&hooks));

    let ok = call(&runtime, "a", "add", r#"{"a":1,"b":2}"#).await;
    let failed = call(&runtime, "b", "divide", r#"{"a":1,"b":0}"#).await;

    assert_eq!(*hooks.starts.lock().expect("starts"), vec!["a", "b"]);
    assert_eq!(*hooks.finishes.lock().expect("finishes"), vec![ok, failed]);
    assert_eq!(*hooks.failures.lock().expect("failures"), 0);
}
