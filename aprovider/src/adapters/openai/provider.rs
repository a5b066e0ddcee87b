//! OpenAI provider implementation over transport and shared models.

use std::sync::Arc;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecureCredentialManager,
};

use super::auth::resolve_openai_auth;
use super::transport::OpenAiTransport;
use super::types::{OpenAiMessage, OpenAiRequest, OpenAiTool};

#[derive(Clone)]
pub struct OpenAiProvider {
    id: ProviderId,
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
    fallback_model: String,
}

impl OpenAiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            id: ProviderId::OpenAi,
            credentials,
            transport,
            fallback_model: "gpt-4o-mini".to_string(),
        }
    }

    /// Reports a different provider id, used for OpenAI-compatible servers.
    pub fn with_provider_id(mut self, id: ProviderId) -> Self {
        self.id = id;
        self
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    pub(crate) fn build_openai_request(&self, request: ModelRequest) -> OpenAiRequest {
        let model = if request.model.trim().is_empty() {
            self.fallback_model.clone()
        } else {
            request.model
        };

        OpenAiRequest {
            model,
            messages: request.messages.into_iter().map(OpenAiMessage::from).collect(),
            tools: request.tools.into_iter().map(OpenAiTool::from).collect(),
            temperature: request.options.temperature,
            max_tokens: request.options.max_tokens,
        }
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("id", &self.id)
            .field("transport", &self.transport)
            .field("fallback_model", &self.fallback_model)
            .finish()
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = resolve_openai_auth(&self.credentials, self.id)?;
            let openai_request = self.build_openai_request(request);
            let response = self
                .transport
                .complete(openai_request, auth)
                .await
                .map_err(|error| error.with_provider(self.id))?;
            Ok(response.into_model_response(self.id))
        })
    }
}
