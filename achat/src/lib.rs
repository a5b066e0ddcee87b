//! Conversational orchestration over a model provider and a tool runtime.
//!
//! ```rust
//! use achat::{ChatPolicy, ChatSession, ChatTurnRequest};
//! use aprovider::ProviderId;
//!
//! let session = ChatSession::new("session-1", ProviderId::OpenAi, "gpt-4o-mini")
//!     .with_system_prompt("You are a careful calculator.");
//! let request = ChatTurnRequest::new(session, "What is 12 divided by 4?");
//!
//! assert_eq!(request.session.id.as_str(), "session-1");
//! assert_eq!(ChatPolicy::default().max_tool_round_trips, 4);
//! ```

mod error;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatErrorPhase, ChatErrorSource, ChatPolicy, ChatService,
        ChatServiceBuilder, ChatSession, ChatTurnRequest, ChatTurnResult, ConversationStore,
        InMemoryConversationStore,
    };
    pub use acommon::{MetadataMap, SessionId, TraceId};
    pub use atooling::{
        DefaultToolRuntime, MiddlewareChain, Tool, ToolError, ToolErrorKind,
        ToolExecutionContext, ToolOutcome, ToolRegistry, ToolRuntime,
    };
}

pub use acommon::{GenerationOptions, MetadataMap, SessionId, TraceId};
pub use error::{ChatError, ChatErrorKind, ChatErrorPhase, ChatErrorSource};
pub use service::{
    ChatPolicy, ChatService, ChatServiceBuilder, DEFAULT_MAX_TOOL_ROUND_TRIPS,
    TOOL_ROUND_LIMIT_REPLY,
};
pub use store::{ChatFuture, ConversationStore, InMemoryConversationStore};
pub use types::{ChatSession, ChatTurnRequest, ChatTurnResult};
