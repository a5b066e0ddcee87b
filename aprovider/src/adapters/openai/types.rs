//! Adapter-level shapes sitting between the provider model and the JSON wire format.
//!
//! Requests are flattened from [`ModelRequest`](crate::ModelRequest) before they
//! reach a transport, and transports hand back an [`OpenAiResponse`] that the
//! provider folds into a [`ModelResponse`].

use serde::{Deserialize, Serialize};

use crate::{
    Message, ModelResponse, OutputItem, ProviderId, Role, SecretString, StopReason, TokenUsage,
    ToolCall, ToolDefinition,
};

#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiRequest {
    pub model: String,
    pub messages: Vec<OpenAiMessage>,
    pub tools: Vec<OpenAiTool>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiMessage {
    pub role: OpenAiRole,
    pub content: String,
    pub tool_calls: Vec<OpenAiToolCall>,
    pub tool_call_id: Option<String>,
}

impl OpenAiMessage {
    /// An assistant turn that carries nothing but tool requests.
    pub fn is_tool_request_only(&self) -> bool {
        self.role == OpenAiRole::Assistant
            && !self.tool_calls.is_empty()
            && self.content.is_empty()
    }
}

impl From<Message> for OpenAiMessage {
    fn from(message: Message) -> Self {
        let role = match message.role {
            Role::System => OpenAiRole::System,
            Role::User => OpenAiRole::User,
            Role::Assistant => OpenAiRole::Assistant,
            Role::Tool => OpenAiRole::Tool,
        };

        Self {
            role,
            content: message.content,
            tool_calls: message
                .tool_calls
                .into_iter()
                .map(|call| OpenAiToolCall {
                    id: call.id.as_str().to_string(),
                    name: call.name,
                    arguments: call.arguments,
                })
                .collect(),
            tool_call_id: message.tool_call_id.map(|id| id.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAiRole {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiTool {
    pub name: String,
    pub description: String,
    /// JSON Schema text, parsed when the request body is built.
    pub input_schema: String,
}

impl From<ToolDefinition> for OpenAiTool {
    fn from(definition: ToolDefinition) -> Self {
        Self {
            name: definition.name,
            description: definition.description,
            input_schema: definition.input_schema,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiAssistantMessage {
    pub content: String,
    pub tool_calls: Vec<OpenAiToolCall>,
}

/// Why the model stopped. Unrecognised values, including `content_filter`, land on `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenAiFinishReason {
    Stop,
    Length,
    #[serde(alias = "function_call")]
    ToolCalls,
    Cancelled,
    #[default]
    #[serde(other)]
    Other,
}

impl OpenAiFinishReason {
    pub fn stop_reason(self) -> StopReason {
        match self {
            Self::Stop => StopReason::EndTurn,
            Self::Length => StopReason::MaxTokens,
            Self::ToolCalls => StopReason::ToolUse,
            Self::Cancelled => StopReason::Cancelled,
            Self::Other => StopReason::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct OpenAiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiResponse {
    pub model: String,
    pub message: OpenAiAssistantMessage,
    pub finish_reason: OpenAiFinishReason,
    pub usage: OpenAiUsage,
}

impl OpenAiResponse {
    pub(crate) fn into_model_response(self, provider: ProviderId) -> ModelResponse {
        let OpenAiAssistantMessage {
            content,
            tool_calls,
        } = self.message;

        let text = (!content.is_empty())
            .then(|| OutputItem::Message(Message::new(Role::Assistant, content)));
        let calls = tool_calls
            .into_iter()
            .map(|call| OutputItem::ToolCall(ToolCall::new(call.id, call.name, call.arguments)));

        ModelResponse {
            provider,
            model: self.model,
            output: text.into_iter().chain(calls).collect(),
            stop_reason: self.finish_reason.stop_reason(),
            usage: TokenUsage {
                input_tokens: self.usage.prompt_tokens,
                output_tokens: self.usage.completion_tokens,
                total_tokens: self.usage.total_tokens,
            },
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum OpenAiAuth {
    ApiKey(SecretString),
}

impl std::fmt::Debug for OpenAiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("OpenAiAuth::ApiKey([REDACTED])"),
        }
    }
}
