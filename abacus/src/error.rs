//! Application-level error wrapping every layer the binary touches.

use std::error::Error;
use std::fmt::{Display, Formatter};

use achat::ChatError;
use agraph::GraphError;
use aprovider::ProviderError;
use atooling::ToolError;

use crate::config::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppErrorKind {
    Config,
    Provider,
    Chat,
    Tooling,
    Graph,
    Io,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
}

impl AppError {
    pub fn new(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Io, message)
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} error: {}", self.kind, self.message)
    }
}

impl Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::new(AppErrorKind::Config, value.message)
    }
}

impl From<ProviderError> for AppError {
    fn from(value: ProviderError) -> Self {
        Self::new(AppErrorKind::Provider, value.to_string())
    }
}

impl From<ChatError> for AppError {
    fn from(value: ChatError) -> Self {
        Self::new(AppErrorKind::Chat, value.to_string())
    }
}

impl From<ToolError> for AppError {
    fn from(value: ToolError) -> Self {
        Self::new(AppErrorKind::Tooling, value.to_string())
    }
}

impl From<GraphError> for AppError {
    fn from(value: GraphError) -> Self {
        Self::new(AppErrorKind::Graph, value.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::io(value.to_string())
    }
}
