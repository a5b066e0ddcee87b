//! Turn orchestration: provider round trips interleaved with tool execution.

use std::sync::Arc;

use acommon::GenerationOptions;
use aprovider::{Message, ModelProvider, ModelRequest, Role, TokenUsage, ToolDefinition};
use atooling::{ToolExecutionContext, ToolRuntime};

use crate::{
    ChatError, ChatSession, ChatTurnRequest, ChatTurnResult, ConversationStore,
    InMemoryConversationStore,
};

pub const DEFAULT_MAX_TOOL_ROUND_TRIPS: usize = 4;

/// Reply used when the budget runs out while the model was still only requesting tools.
pub const TOOL_ROUND_LIMIT_REPLY: &str =
    "I stopped before finishing because the tool round-trip limit was reached.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatPolicy {
    /// Model responses carrying tool calls that will be executed in one turn.
    pub max_tool_round_trips: usize,
}

impl ChatPolicy {
    pub fn with_max_tool_round_trips(mut self, max_tool_round_trips: usize) -> Self {
        self.max_tool_round_trips = max_tool_round_trips;
        self
    }
}

impl Default for ChatPolicy {
    fn default() -> Self {
        Self {
            max_tool_round_trips: DEFAULT_MAX_TOOL_ROUND_TRIPS,
        }
    }
}

#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    store: Arc<dyn ConversationStore>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    policy: ChatPolicy,
}

impl ChatService {
    pub fn new(provider: Arc<dyn ModelProvider>, store: Arc<dyn ConversationStore>) -> Self {
        Self {
            provider,
            store,
            tool_runtime: None,
            policy: ChatPolicy::default(),
        }
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> ChatServiceBuilder {
        ChatServiceBuilder::new(provider)
    }

    pub fn policy(&self) -> ChatPolicy {
        self.policy
    }

    /// Runs one user turn to completion.
    ///
    /// While the model keeps requesting tools and the round-trip budget allows,
    /// each call is executed in order and its outcome is fed back as a tool
    /// message carrying the call's id. Only the user input and the final
    /// assistant reply are persisted. A turn cut short by the budget with no
    /// assistant text replies with [`TOOL_ROUND_LIMIT_REPLY`].
    pub async fn run_turn(&self, request: ChatTurnRequest) -> Result<ChatTurnResult, ChatError> {
        let TurnContext {
            session,
            user_message,
            mut messages,
            options,
            tool_context,
        } = self.prepare_turn(request).await?;

        let tools = self
            .tool_runtime
            .as_ref()
            .map(|runtime| runtime.definitions())
            .unwrap_or_default();

        let mut usage = TokenUsage::default();
        let mut tool_calls = Vec::new();
        let mut tool_outcomes = Vec::new();
        let mut round_trips = 0_usize;

        let (assistant_message, stop_reason, tool_round_limit_reached) = loop {
            let model_request = build_request(&session, &messages, options, &tools)?;
            let response = self.provider.complete(model_request).await?;
            usage.accumulate(response.usage);

            let text = response.text();
            let calls = response.tool_calls();
            if calls.is_empty() {
                break (text, response.stop_reason, false);
            }

            let Some(runtime) = &self.tool_runtime else {
                return Err(ChatError::tooling(
                    "model requested tool calls but no tool runtime is configured",
                ));
            };

            if round_trips >= self.policy.max_tool_round_trips {
                let reply = if text.trim().is_empty() {
                    TOOL_ROUND_LIMIT_REPLY.to_string()
                } else {
                    text
                };
                break (reply, response.stop_reason, true);
            }
            round_trips += 1;

            messages.push(Message::assistant_with_tool_calls(text, calls.clone()));
            for call in calls {
                let outcome = runtime.execute(call.clone(), tool_context.clone()).await?;
                messages.push(outcome.to_message());
                tool_calls.push(call);
                tool_outcomes.push(outcome);
            }
        };

        let assistant = Message::new(Role::Assistant, assistant_message.clone());
        self.store
            .append_messages(&session.id, vec![user_message, assistant])
            .await?;

        Ok(ChatTurnResult {
            session_id: session.id,
            assistant_message,
            tool_calls,
            tool_outcomes,
            stop_reason,
            usage,
            tool_round_limit_reached,
        })
    }

    async fn prepare_turn(&self, request: ChatTurnRequest) -> Result<TurnContext, ChatError> {
        if request.user_input.trim().is_empty() {
            return Err(ChatError::invalid_request("user_input must not be empty"));
        }

        let ChatTurnRequest {
            session,
            user_input,
            options,
            trace_id,
        } = request;

        let prior = self.store.load_messages(&session.id).await?;
        let user_message = Message::new(Role::User, user_input);

        let mut messages = Vec::new();
        if let Some(system_prompt) = &session.system_prompt {
            messages.push(Message::new(Role::System, system_prompt.clone()));
        }

        messages.extend(prior);
        messages.push(user_message.clone());

        let mut tool_context = ToolExecutionContext::new(session.id.clone())
            .with_metadata("model", session.model.clone());
        if let Some(trace_id) = trace_id {
            tool_context = tool_context.with_trace_id(trace_id);
        }

        Ok(TurnContext {
            session,
            user_message,
            messages,
            options,
            tool_context,
        })
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("provider", &self.provider.id())
            .field("has_tool_runtime", &self.tool_runtime.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}

pub struct ChatServiceBuilder {
    provider: Arc<dyn ModelProvider>,
    store: Option<Arc<dyn ConversationStore>>,
    tool_runtime: Option<Arc<dyn ToolRuntime>>,
    policy: ChatPolicy,
}

impl ChatServiceBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            store: None,
            tool_runtime: None,
            policy: ChatPolicy::default(),
        }
    }

    pub fn store(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn tool_runtime(mut self, tool_runtime: Arc<dyn ToolRuntime>) -> Self {
        self.tool_runtime = Some(tool_runtime);
        self
    }

    pub fn policy(mut self, policy: ChatPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_tool_round_trips(mut self, max_tool_round_trips: usize) -> Self {
        self.policy.max_tool_round_trips = max_tool_round_trips;
        self
    }

    pub fn build(self) -> ChatService {
        ChatService {
            provider: self.provider,
            store: self
                .store
                .unwrap_or_else(|| Arc::new(InMemoryConversationStore::new())),
            tool_runtime: self.tool_runtime,
            policy: self.policy,
        }
    }
}

struct TurnContext {
    session: ChatSession,
    user_message: Message,
    messages: Vec<Message>,
    options: GenerationOptions,
    tool_context: ToolExecutionContext,
}

fn build_request(
    session: &ChatSession,
    messages: &[Message],
    options: GenerationOptions,
    tools: &[ToolDefinition],
) -> Result<ModelRequest, ChatError> {
    let request = ModelRequest::new(session.model.clone(), messages.to_vec())
        .with_options(options)
        .with_tools(tools.to_vec());
    request.validate()?;
    Ok(request)
}
