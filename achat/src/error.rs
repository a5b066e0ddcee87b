//! Chat-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use aprovider::{ProviderError, ProviderErrorKind};
use atooling::{ToolError, ToolErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Provider,
    Store,
    Tooling,
}

/// Where in the turn the failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorPhase {
    Preparation,
    Provider,
    Tooling,
    Persistence,
}

/// Originating lower-layer error, kept for callers that need its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatErrorSource {
    Provider(ProviderErrorKind),
    Tool(ToolError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub phase: Option<ChatErrorPhase>,
    pub source: Option<ChatErrorSource>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            phase: None,
            source: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message).with_phase(ChatErrorPhase::Preparation)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Provider, message).with_phase(ChatErrorPhase::Provider)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message).with_phase(ChatErrorPhase::Persistence)
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Tooling, message).with_phase(ChatErrorPhase::Tooling)
    }

    pub fn with_phase(mut self, phase: ChatErrorPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn tool_error(&self) -> Option<&ToolError> {
        match &self.source {
            Some(ChatErrorSource::Tool(error)) => Some(error),
            _ => None,
        }
    }

    pub fn tool_kind(&self) -> Option<ToolErrorKind> {
        self.tool_error().map(|error| error.kind)
    }

    pub fn is_user_error(&self) -> bool {
        match &self.source {
            Some(ChatErrorSource::Tool(error)) => error.is_user_error(),
            Some(ChatErrorSource::Provider(kind)) => *kind == ProviderErrorKind::InvalidRequest,
            None => self.kind == ChatErrorKind::InvalidRequest,
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Some(phase) => write!(f, "{:?} during {:?}: {}", self.kind, phase, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        let kind = value.kind;
        let mut error = if kind == ProviderErrorKind::InvalidRequest {
            ChatError::invalid_request(value.to_string())
        } else {
            ChatError::provider(value.to_string())
        };
        error.source = Some(ChatErrorSource::Provider(kind));
        error
    }
}

impl From<ToolError> for ChatError {
    fn from(value: ToolError) -> Self {
        let mut error = ChatError::tooling(value.to_string());
        error.source = Some(ChatErrorSource::Tool(value));
        error
    }
}
