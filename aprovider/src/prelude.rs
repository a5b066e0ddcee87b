//! Common `aprovider` imports for downstream crates.

pub use crate::{
    Message, ModelProvider, ModelRequest, ModelResponse, OutputItem, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderId, Role, StopReason, TokenUsage, ToolCall,
    ToolDefinition,
};
pub use acommon::{BoxFuture, CallId, GenerationOptions};
