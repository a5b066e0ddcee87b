//! Conversation storage contracts and a basic in-memory implementation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use acommon::{BoxFuture, SessionId};
use aprovider::Message;

use crate::ChatError;

pub type ChatFuture<'a, T> = BoxFuture<'a, T>;

pub trait ConversationStore: Send + Sync {
    fn load_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> ChatFuture<'a, Result<Vec<Message>, ChatError>>;

    fn append_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
        messages: Vec<Message>,
    ) -> ChatFuture<'a, Result<(), ChatError>>;
}

/// Process-lifetime history keyed by session id.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    sessions: Mutex<HashMap<SessionId, Vec<Message>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, Vec<Message>>>, ChatError> {
        self.sessions
            .lock()
            .map_err(|_| ChatError::store("conversation store lock poisoned"))
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn load_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> ChatFuture<'a, Result<Vec<Message>, ChatError>> {
        Box::pin(async move { Ok(self.sessions()?.get(session_id).cloned().unwrap_or_default()) })
    }

    fn append_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
        messages: Vec<Message>,
    ) -> ChatFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            self.sessions()?
                .entry(session_id.clone())
                .or_default()
                .extend(messages);

            Ok(())
        })
    }
}
