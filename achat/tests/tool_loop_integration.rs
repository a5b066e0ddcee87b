use std::sync::{Arc, Mutex};

use achat::prelude::*;
use aprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError, ProviderFuture,
    ProviderId, Role, StopReason, TokenUsage, ToolCall,
};
use atooling::{
    ErrorTranslationMiddleware, OutcomeStatus, ParameterSpec, ToolSchema, required_f64,
};

#[derive(Debug, Default)]
struct ToolLoopProvider {
    requests: Mutex<Vec<ModelRequest>>,
}

impl ModelProvider for ToolLoopProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .expect("requests lock")
                .push(request.clone());

            let answered = request
                .messages
                .last()
                .is_some_and(|message| message.role == Role::Tool);
            if !answered {
                return Ok(ModelResponse {
                    provider: ProviderId::OpenAi,
                    model: request.model,
                    output: vec![OutputItem::ToolCall(ToolCall::new(
                        "tool_call_1",
                        "divide",
                        r#"{"a":1,"b":0}"#,
                    ))],
                    stop_reason: StopReason::ToolUse,
                    usage: TokenUsage {
                        input_tokens: 5,
                        output_tokens: 2,
                        total_tokens: 7,
                    },
                });
            }

            Ok(ModelResponse {
                provider: ProviderId::OpenAi,
                model: request.model,
                output: vec![OutputItem::Message(Message::new(
                    Role::Assistant,
                    "Division by zero is undefined.",
                ))],
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage {
                    input_tokens: 6,
                    output_tokens: 2,
                    total_tokens: 8,
                },
            })
        })
    }
}

#[derive(Debug, Default)]
struct InsistentProvider {
    calls: Mutex<usize>,
}

impl ModelProvider for InsistentProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            let mut calls = self.calls.lock().expect("calls lock");
            *calls += 1;

            Ok(ModelResponse {
                provider: ProviderId::OpenAi,
                model: request.model,
                output: vec![OutputItem::ToolCall(ToolCall::new(
                    format!("call_{calls}"),
                    "divide",
                    r#"{"a":8,"b":2}"#,
                ))],
                stop_reason: StopReason::ToolUse,
                usage: TokenUsage::default(),
            })
        })
    }
}

fn divide_registry() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry
        .register_sync_fn(
            ToolSchema::new("divide", "Divide a by b")
                .parameter(ParameterSpec::number("a", "Dividend"))
                .parameter(ParameterSpec::number("b", "Divisor")),
            |args, _ctx| {
                let b = required_f64(&args, "b")?;
                if b == 0.0 {
                    return Err(ToolError::execution("Cannot divide by zero"));
                }
                Ok((required_f64(&args, "a")? / b).to_string())
            },
        )
        .expect("divide registers");
    Arc::new(registry)
}

fn translating_runtime() -> Arc<DefaultToolRuntime> {
    let chain = MiddlewareChain::builder()
        .with(ErrorTranslationMiddleware::new())
        .build();
    Arc::new(DefaultToolRuntime::with_middleware(divide_registry(), chain))
}

#[tokio::test]
async fn chat_tool_loop_feeds_translated_failure_back_to_the_model() {
    let provider = Arc::new(ToolLoopProvider::default());
    let service = ChatService::builder(provider.clone())
        .tool_runtime(translating_runtime())
        .max_tool_round_trips(2)
        .build();

    let session = ChatSession::new("int-s1", ProviderId::OpenAi, "gpt-4o-mini");
    let result = service
        .run_turn(ChatTurnRequest::new(session, "what is 1 / 0?"))
        .await
        .expect("turn should succeed");

    assert_eq!(result.assistant_message, "Division by zero is undefined.");
    assert!(!result.tool_round_limit_reached);
    assert_eq!(result.usage.total_tokens, 15);
    assert_eq!(result.tool_outcomes.len(), 1);

    let outcome = &result.tool_outcomes[0];
    assert_eq!(outcome.status, OutcomeStatus::Error);
    assert_eq!(outcome.call_id.as_str(), "tool_call_1");
    assert!(outcome.content.contains("Cannot divide by zero"));

    let requests = provider.requests.lock().expect("requests lock");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].tools.len(), 1);

    let second = &requests[1].messages;
    let assistant = &second[second.len() - 2];
    assert_eq!(assistant.role, Role::Assistant);
    assert_eq!(assistant.tool_calls[0].id.as_str(), "tool_call_1");
    let tool_message = &second[second.len() - 1];
    assert_eq!(tool_message.tool_call_id, Some("tool_call_1".into()));
    assert_eq!(tool_message.content, outcome.content);
}

#[tokio::test]
async fn chat_tool_loop_surfaces_tooling_error_without_translation() {
    let provider = Arc::new(ToolLoopProvider::default());
    let runtime = Arc::new(DefaultToolRuntime::new(divide_registry()));
    let service = ChatService::builder(provider)
        .tool_runtime(runtime)
        .build();

    let session = ChatSession::new("int-s2", ProviderId::OpenAi, "gpt-4o-mini");
    let error = service
        .run_turn(ChatTurnRequest::new(session, "go"))
        .await
        .expect_err("untranslated tool failure aborts the turn");

    assert_eq!(error.kind, ChatErrorKind::Tooling);
    assert_eq!(error.phase, Some(ChatErrorPhase::Tooling));
    assert!(!error.is_user_error());
    let tool_error = error.tool_error().expect("tool error source");
    assert_eq!(tool_error.kind, ToolErrorKind::Execution);
    assert_eq!(tool_error.tool_call_id, Some("tool_call_1".into()));
}

#[tokio::test]
async fn chat_tool_loop_stops_at_round_trip_budget() {
    let provider = Arc::new(InsistentProvider::default());
    let store = Arc::new(InMemoryConversationStore::new());
    let service = ChatService::builder(provider.clone())
        .store(store.clone())
        .tool_runtime(translating_runtime())
        .max_tool_round_trips(2)
        .build();

    let session = ChatSession::new("int-s3", ProviderId::OpenAi, "gpt-4o-mini");
    let result = service
        .run_turn(ChatTurnRequest::new(session.clone(), "keep dividing"))
        .await
        .expect("turn should end at the budget");

    assert!(result.tool_round_limit_reached);
    assert_eq!(result.assistant_message, achat::TOOL_ROUND_LIMIT_REPLY);
    assert_eq!(result.tool_outcomes.len(), 2);
    assert_eq!(result.tool_outcomes[0].content, "4");
    assert_eq!(*provider.calls.lock().expect("calls lock"), 3);

    let activity: Vec<_> = result
        .tool_activity()
        .map(|(call, outcome)| (call.id.clone(), outcome.call_id.clone()))
        .collect();
    assert!(activity.iter().all(|(call, outcome)| call == outcome));

    let saved = store.load_messages(&session.id).await.expect("load saved");
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1].content, achat::TOOL_ROUND_LIMIT_REPLY);
}
