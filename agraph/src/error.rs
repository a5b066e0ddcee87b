//! Graph construction and execution errors.
//!
//! ```rust
//! use agraph::{GraphError, GraphErrorKind};
//!
//! let err = GraphError::invalid_graph("entry point is not set");
//! assert_eq!(err.kind, GraphErrorKind::InvalidGraph);
//! assert!(err.to_string().contains("entry point"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphErrorKind {
    InvalidGraph,
    NodeFailed,
    InvalidTransition,
    StepLimitExceeded,
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphError {
    pub kind: GraphErrorKind,
    pub message: String,
    pub node: Option<String>,
}

impl GraphError {
    pub fn new(kind: GraphErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            node: None,
        }
    }

    pub fn invalid_graph(message: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::InvalidGraph, message)
    }

    pub fn node_failed(message: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::NodeFailed, message)
    }

    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::InvalidTransition, message)
    }

    pub fn step_limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::StepLimitExceeded, message)
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::new(GraphErrorKind::Export, message)
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.node {
            Some(node) => write!(f, "{:?} [node={}]: {}", self.kind, node, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for GraphError {}
