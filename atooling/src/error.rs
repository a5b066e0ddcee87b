//! Tool execution errors and classifications.

use std::error::Error;
use std::fmt::{Display, Formatter};

use acommon::CallId;

use crate::ToolInvocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    NotFound,
    InvalidArguments,
    Execution,
    Timeout,
    Network,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub tool_name: Option<String>,
    pub tool_call_id: Option<CallId>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tool_name: None,
            tool_call_id: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Execution, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Timeout, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Network, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Other, message)
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    pub fn with_tool_call_id(mut self, tool_call_id: impl Into<CallId>) -> Self {
        self.tool_call_id = Some(tool_call_id.into());
        self
    }

    /// Fills in tool name and call id from the invocation unless already set.
    pub fn for_invocation(mut self, invocation: &ToolInvocation) -> Self {
        if self.tool_name.is_none() {
            self.tool_name = Some(invocation.tool_name.clone());
        }
        if self.tool_call_id.is_none() {
            self.tool_call_id = Some(invocation.call_id.clone());
        }
        self
    }

    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::InvalidArguments | ToolErrorKind::NotFound
        )
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.tool_name, &self.tool_call_id) {
            (Some(tool_name), Some(tool_call_id)) => write!(
                f,
                "{:?} [tool={}, call_id={}]: {}",
                self.kind, tool_name, tool_call_id, self.message
            ),
            (Some(tool_name), None) => {
                write!(f, "{:?} [tool={}]: {}", self.kind, tool_name, self.message)
            }
            _ => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ToolError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolExecutionContext;

    #[test]
    fn user_error_classification() {
        assert!(ToolError::invalid_arguments("bad args").is_user_error());
        assert!(ToolError::not_found("missing").is_user_error());
        assert!(!ToolError::timeout("slow").is_user_error());
        assert!(!ToolError::network("down").is_user_error());
    }

    #[test]
    fn context_fields_are_included_in_display() {
        let error = ToolError::execution("Cannot divide by zero")
            .with_tool_name("divide")
            .with_tool_call_id("call_1");

        let rendered = error.to_string();
        assert!(rendered.contains("divide"));
        assert!(rendered.contains("call_1"));
        assert!(rendered.contains("Cannot divide by zero"));
    }

    #[test]
    fn for_invocation_keeps_explicit_context() {
        let invocation = ToolInvocation::new(
            "call_2",
            "add",
            serde_json::json!({}),
            ToolExecutionContext::new("s1"),
        );

        let filled = ToolError::other("boom").for_invocation(&invocation);
        assert_eq!(filled.tool_name.as_deref(), Some("add"));
        assert_eq!(filled.tool_call_id, Some(CallId::from("call_2")));

        let kept = ToolError::other("boom")
            .with_tool_name("inner")
            .for_invocation(&invocation);
        assert_eq!(kept.tool_name.as_deref(), Some("inner"));
    }
}
