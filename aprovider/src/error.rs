//! Provider failures, classified by kind and optionally tagged with the HTTP
//! status and the provider that produced them.
//!
//! ```rust
//! use aprovider::{ProviderError, ProviderErrorKind, ProviderId};
//!
//! let err = ProviderError::from_status(429, "slow down").with_provider(ProviderId::OpenAi);
//! assert_eq!(err.kind, ProviderErrorKind::RateLimited);
//! assert_eq!(err.to_string(), "RateLimited [openai, status 429]: slow down");
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::ProviderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Authentication,
    RateLimited,
    InvalidRequest,
    Timeout,
    Transport,
    Unavailable,
    /// The provider answered, but not in a shape the adapter understands.
    Protocol,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub provider: Option<ProviderId>,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            provider: None,
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Protocol, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let kind = match status {
            401 | 403 => ProviderErrorKind::Authentication,
            429 => ProviderErrorKind::RateLimited,
            408 | 504 => ProviderErrorKind::Timeout,
            400 | 404 | 422 => ProviderErrorKind::InvalidRequest,
            502 | 503 => ProviderErrorKind::Unavailable,
            _ => ProviderErrorKind::Transport,
        };

        Self::new(kind, message).with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Failures that repeating the same request will not fix.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self.kind,
            ProviderErrorKind::Authentication | ProviderErrorKind::InvalidRequest
        )
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.provider, self.status) {
            (Some(provider), Some(status)) => write!(
                f,
                "{:?} [{provider}, status {status}]: {}",
                self.kind, self.message
            ),
            (Some(provider), None) => write!(f, "{:?} [{provider}]: {}", self.kind, self.message),
            (None, Some(status)) => {
                write!(f, "{:?} [status {status}]: {}", self.kind, self.message)
            }
            (None, None) => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ProviderError {}
