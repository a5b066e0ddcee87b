//! Chat session, turn request, and turn result types.

use acommon::{GenerationOptions, SessionId, TraceId};
use aprovider::{ProviderId, StopReason, TokenUsage, ToolCall};
use atooling::ToolOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: SessionId,
    pub provider: ProviderId,
    pub model: String,
    pub system_prompt: Option<String>,
}

impl ChatSession {
    pub fn new(id: impl Into<SessionId>, provider: ProviderId, model: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provider,
            model: model.into(),
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurnRequest {
    pub session: ChatSession,
    pub user_input: String,
    pub options: GenerationOptions,
    pub trace_id: Option<TraceId>,
}

impl ChatTurnRequest {
    pub fn new(session: ChatSession, user_input: impl Into<String>) -> Self {
        Self {
            session,
            user_input: user_input.into(),
            options: GenerationOptions::default(),
            trace_id: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.options = self.options.with_temperature(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.options = self.options.with_max_tokens(max_tokens);
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

/// Everything one user turn produced.
///
/// `tool_calls` and `tool_outcomes` are parallel: the outcome at index `i`
/// answers the call at index `i` and carries the same call id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnResult {
    pub session_id: SessionId,
    pub assistant_message: String,
    pub tool_calls: Vec<ToolCall>,
    pub tool_outcomes: Vec<ToolOutcome>,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
    pub tool_round_limit_reached: bool,
}

impl ChatTurnResult {
    pub fn tool_activity(&self) -> impl Iterator<Item = (&ToolCall, &ToolOutcome)> {
        self.tool_calls.iter().zip(self.tool_outcomes.iter())
    }
}
