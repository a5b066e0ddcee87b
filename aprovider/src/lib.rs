//! Provider-agnostic chat model contracts plus the OpenAI chat-completions adapter.
//!
//! The chat layer only ever talks to [`ModelProvider`]; adapters translate the shared
//! [`ModelRequest`]/[`ModelResponse`] shapes to a vendor wire format.

mod credentials;
mod error;
mod model;
mod provider;

pub mod adapters;
pub mod prelude;

pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ProviderError, ProviderErrorKind};
pub use model::{
    Message, ModelRequest, ModelResponse, OutputItem, ProviderId, Role, StopReason, TokenUsage,
    ToolCall, ToolDefinition,
};
pub use provider::{ModelProvider, ProviderFuture};
