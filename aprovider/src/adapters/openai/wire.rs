//! JSON bodies exchanged with a `/chat/completions` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderError;

use super::types::{
    OpenAiAssistantMessage, OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse,
    OpenAiRole, OpenAiTool, OpenAiToolCall, OpenAiUsage,
};

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionBody {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl TryFrom<OpenAiRequest> for ChatCompletionBody {
    type Error = ProviderError;

    fn try_from(request: OpenAiRequest) -> Result<Self, Self::Error> {
        if request.messages.is_empty() {
            return Err(ProviderError::invalid_request(
                "chat completion needs at least one message",
            ));
        }

        Ok(Self {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .map(WireMessage::try_from)
                .collect::<Result<_, _>>()?,
            tools: request
                .tools
                .into_iter()
                .map(WireTool::try_from)
                .collect::<Result<_, _>>()?,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireMessage {
    pub role: OpenAiRole,
    /// Serialized as `null` for assistant turns that only request tools.
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl TryFrom<OpenAiMessage> for WireMessage {
    type Error = ProviderError;

    fn try_from(message: OpenAiMessage) -> Result<Self, Self::Error> {
        match message.role {
            OpenAiRole::Tool if message.tool_call_id.is_none() => {
                return Err(ProviderError::invalid_request(
                    "tool result is missing its tool_call_id",
                ));
            }
            OpenAiRole::Assistant => {}
            _ if message.content.trim().is_empty() => {
                return Err(ProviderError::invalid_request(format!(
                    "{:?} message has no content",
                    message.role
                )));
            }
            _ => {}
        }

        let content = (!message.is_tool_request_only()).then_some(message.content);

        Ok(Self {
            role: message.role,
            content,
            tool_calls: message.tool_calls.into_iter().map(WireToolCall::from).collect(),
            tool_call_id: message.tool_call_id,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum CallKind {
    #[default]
    Function,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireToolCall {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: CallKind,
    pub function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireFunctionCall {
    pub name: String,
    pub arguments: String,
}

impl From<OpenAiToolCall> for WireToolCall {
    fn from(call: OpenAiToolCall) -> Self {
        Self {
            id: call.id,
            kind: CallKind::Function,
            function: WireFunctionCall {
                name: call.name,
                arguments: call.arguments,
            },
        }
    }
}

impl From<WireToolCall> for OpenAiToolCall {
    fn from(call: WireToolCall) -> Self {
        Self {
            id: call.id,
            name: call.function.name,
            arguments: call.function.arguments,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct WireTool {
    #[serde(rename = "type")]
    pub kind: CallKind,
    pub function: WireFunctionSpec,
}

#[derive(Debug, Serialize)]
pub(crate) struct WireFunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl TryFrom<OpenAiTool> for WireTool {
    type Error = ProviderError;

    fn try_from(tool: OpenAiTool) -> Result<Self, Self::Error> {
        let parameters = serde_json::from_str(&tool.input_schema).map_err(|err| {
            ProviderError::invalid_request(format!(
                "schema for tool '{}' is not valid JSON: {err}",
                tool.name
            ))
        })?;

        Ok(Self {
            kind: CallKind::Function,
            function: WireFunctionSpec {
                name: tool.name,
                description: tool.description,
                parameters,
            },
        })
    }
}

/// A completion as returned by the server. Compatible servers often omit
/// `model` or `usage`, so both default.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletion {
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<OpenAiFinishReason>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<WireToolCall>>,
}

impl TryFrom<ChatCompletion> for OpenAiResponse {
    type Error = ProviderError;

    fn try_from(completion: ChatCompletion) -> Result<Self, Self::Error> {
        let Some(choice) = completion.choices.into_iter().next() else {
            return Err(ProviderError::protocol(
                "completion response did not include choices",
            ));
        };

        Ok(Self {
            model: completion.model,
            message: OpenAiAssistantMessage {
                content: choice.message.content.unwrap_or_default(),
                tool_calls: choice
                    .message
                    .tool_calls
                    .into_iter()
                    .flatten()
                    .map(OpenAiToolCall::from)
                    .collect(),
            },
            finish_reason: choice.finish_reason.unwrap_or_default(),
            usage: completion.usage.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Structured { message: String },
    Plain(String),
}

/// Pulls a human-readable message out of an error body, if it has one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    match serde_json::from_str::<ErrorEnvelope>(body).ok()?.error {
        ErrorDetail::Structured { message } | ErrorDetail::Plain(message) => Some(message),
    }
}
