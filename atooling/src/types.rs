//! Invocation records and outcomes that flow through the middleware chain.

use acommon::{CallId, MetadataMap, SessionId, TraceId};
use aprovider::{Message, ToolCall};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionContext {
    pub session_id: SessionId,
    pub trace_id: Option<TraceId>,
    pub metadata: MetadataMap,
}

impl ToolExecutionContext {
    pub fn new(session_id: impl Into<SessionId>) -> Self {
        Self {
            session_id: session_id.into(),
            trace_id: None,
            metadata: MetadataMap::new(),
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// One requested tool call, as seen by every middleware link.
///
/// `arguments` holds the model-supplied JSON. Text that is not valid JSON is
/// kept as a string value so the schema layer can reject it inside the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub call_id: CallId,
    pub tool_name: String,
    pub arguments: Value,
    pub context: ToolExecutionContext,
}

impl ToolInvocation {
    pub fn new(
        call_id: impl Into<CallId>,
        tool_name: impl Into<String>,
        arguments: Value,
        context: ToolExecutionContext,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            arguments,
            context,
        }
    }

    pub fn from_call(call: &ToolCall, context: ToolExecutionContext) -> Self {
        let raw = call.arguments.trim();
        let arguments = if raw.is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(call.arguments.clone()))
        };

        Self::new(call.id.clone(), call.name.clone(), arguments, context)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutcome {
    pub call_id: CallId,
    pub tool_name: String,
    pub content: String,
    pub status: OutcomeStatus,
}

impl ToolOutcome {
    pub fn success(
        call_id: impl Into<CallId>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            tool_name: tool_name.into(),
            content: content.into(),
            status: OutcomeStatus::Success,
        }
    }

    /// Outcome produced in place of a failure that was not propagated.
    pub fn substitute(
        call_id: impl Into<CallId>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            status: OutcomeStatus::Error,
            ..Self::success(call_id, tool_name, content)
        }
    }

    pub fn is_substitute(&self) -> bool {
        self.status == OutcomeStatus::Error
    }

    pub fn to_message(&self) -> Message {
        Message::tool(self.call_id.clone(), self.content.clone())
    }
}
