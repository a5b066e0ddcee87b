//! Chat-completions transport seam and its reqwest implementation.

use reqwest::{Client, Response};

use crate::{ProviderError, ProviderFuture};

use super::types::{OpenAiAuth, OpenAiRequest, OpenAiResponse};
use super::wire::{ChatCompletion, ChatCompletionBody, error_message};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const CHAT_COMPLETIONS_PATH: &str = "chat/completions";

/// Sends one already-converted request. Swapped for a fake in tests.
pub trait OpenAiTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }

    /// Points the transport at any server exposing `/chat/completions`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn completions_url(&self) -> String {
        format!(
            "{}/{CHAT_COMPLETIONS_PATH}",
            self.base_url.trim_end_matches('/')
        )
    }

    async fn error_from_response(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body)
            .unwrap_or_else(|| format!("chat completion failed with status {status}"));

        ProviderError::from_status(status.as_u16(), message)
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        auth: OpenAiAuth,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let body = ChatCompletionBody::try_from(request)?;
            let OpenAiAuth::ApiKey(api_key) = auth;

            let response = self
                .client
                .post(self.completions_url())
                .bearer_auth(api_key.expose())
                .json(&body)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        ProviderError::timeout(err.to_string())
                    } else {
                        ProviderError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(Self::error_from_response(response).await);
            }

            let parsed = response
                .json::<ChatCompletion>()
                .await
                .map_err(|err| ProviderError::protocol(format!("unreadable completion: {err}")))?;

            OpenAiResponse::try_from(parsed)
        })
    }
}
