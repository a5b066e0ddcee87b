//! Wiring for the tool runtime, the model provider, and the chat service.

use std::sync::Arc;
#[cfg(feature = "provider-openai")]
use std::time::Duration;

use achat::{ChatService, ChatSession};
use acommon::SessionId;
use aobserve::{SafeToolHooks, StandardObservabilityHooks};
use aprovider::{ModelProvider, ProviderError};
use atooling::{
    DefaultToolRuntime, ErrorTranslationMiddleware, LoggingMiddleware, MiddlewareChain, ToolError,
    ToolRuntime, ToolRuntimeHooks,
};

use crate::config::AgentConfig;
use crate::tools::demo_registry;

/// `[logging, error translation]`: the logger is outermost and only ever sees
/// translated outcomes.
pub fn default_tool_chain(hooks: Arc<dyn ToolRuntimeHooks>) -> MiddlewareChain {
    MiddlewareChain::builder()
        .with(LoggingMiddleware::new(hooks))
        .with(ErrorTranslationMiddleware::new())
        .build()
}

pub fn observed_tool_chain() -> MiddlewareChain {
    default_tool_chain(Arc::new(SafeToolHooks::new(StandardObservabilityHooks::new())))
}

/// The demo tools behind the observed default chain.
pub fn default_tool_runtime() -> Result<DefaultToolRuntime, ToolError> {
    Ok(DefaultToolRuntime::with_middleware(
        Arc::new(demo_registry()?),
        observed_tool_chain(),
    ))
}

pub fn chat_service(
    provider: Arc<dyn ModelProvider>,
    tool_runtime: Arc<dyn ToolRuntime>,
    config: &AgentConfig,
) -> ChatService {
    ChatService::builder(provider)
        .tool_runtime(tool_runtime)
        .max_tool_round_trips(config.max_tool_round_trips)
        .build()
}

pub fn chat_session(
    session_id: impl Into<SessionId>,
    provider: &dyn ModelProvider,
    config: &AgentConfig,
) -> ChatSession {
    ChatSession::new(session_id, provider.id(), config.model.clone())
        .with_system_prompt(config.system_prompt.clone())
}

#[cfg(feature = "provider-openai")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(90);

/// Builds the OpenAI provider, or an OpenAI-compatible one when a base URL is set.
#[cfg(feature = "provider-openai")]
pub fn build_provider(config: &AgentConfig) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use aprovider::adapters::openai::{OpenAiHttpTransport, OpenAiProvider};
    use aprovider::{ProviderId, SecureCredentialManager};

    let credentials = Arc::new(SecureCredentialManager::new());
    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;
    let transport = OpenAiHttpTransport::new(http);

    let provider = match &config.base_url {
        Some(base_url) => {
            credentials.set_api_key(ProviderId::OpenAiCompatible, config.api_key.expose())?;
            OpenAiProvider::new(credentials, Arc::new(transport.with_base_url(base_url.clone())))
                .with_provider_id(ProviderId::OpenAiCompatible)
        }
        None => {
            credentials.set_openai_api_key(config.api_key.expose())?;
            OpenAiProvider::new(credentials, Arc::new(transport))
        }
    };

    Ok(Arc::new(provider.with_fallback_model(config.model.clone())))
}

#[cfg(not(feature = "provider-openai"))]
pub fn build_provider(_config: &AgentConfig) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-openai feature is not enabled on abacus",
    ))
}
