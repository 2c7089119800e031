//! OpenAI-compatible provider implementation

use async_trait::async_trait;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{Provider, TextStream};
use crate::error::LlmError;
use crate::protocol::{OpenAiRequest, OpenAiStreamChunk};
use crate::types::CompletionRequest;

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// End-of-stream sentinel sent as the final SSE data line
const DONE_SENTINEL: &str = "[DONE]";

/// OpenAI-compatible provider
pub struct OpenAiProvider {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
}

impl OpenAiProvider {
    /// Create a provider for `base_url`, or the public `OpenAI` API when unset
    pub fn new(base_url: Option<Url>, api_key: Option<SecretString>) -> Result<Self, LlmError> {
        let base_url = match base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| LlmError::Configuration(e.to_string()))?,
        };

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key,
        })
    }

    /// Build the chat completions URL
    fn completions_url(&self) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete_stream(&self, request: &CompletionRequest) -> Result<TextStream, LlmError> {
        let wire_request = OpenAiRequest::streaming(request);

        let mut builder = self.client.post(self.completions_url()).json(&wire_request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(provider = %self.name(), error = %e, "upstream stream request failed");
            LlmError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = %self.name(), status = %status, "upstream returned error");
            return Err(LlmError::Upstream(format!("provider returned {status}: {body}")));
        }

        let text_stream = response
            .bytes_stream()
            .eventsource()
            .take_while(|result| {
                let done = matches!(result, Ok(event) if event.data.trim() == DONE_SENTINEL);
                std::future::ready(!done)
            })
            .filter_map(|result| {
                let item = match result {
                    Ok(event) => match serde_json::from_str::<OpenAiStreamChunk>(event.data.trim()) {
                        Ok(chunk) => chunk.text().map(Ok),
                        Err(e) => {
                            tracing::debug!(error = %e, data = %event.data, "skipping unparseable SSE chunk");
                            None
                        }
                    },
                    Err(e) => Some(Err(LlmError::Streaming(e.to_string()))),
                };
                std::future::ready(item)
            });

        Ok(Box::pin(text_stream))
    }
}
