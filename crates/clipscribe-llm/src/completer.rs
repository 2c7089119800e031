use clipscribe_config::LlmConfig;

use crate::error::LlmError;
use crate::provider::openai::OpenAiProvider;
use crate::provider::{Provider, TextStream};
use crate::types::{CompletionRequest, Message};

/// Sends single-message prompts to the configured completion provider
pub struct Completer {
    provider: Box<dyn Provider>,
    model: String,
}

impl Completer {
    /// Build from the `[llm]` configuration section
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let provider = OpenAiProvider::new(config.base_url.clone(), config.api_key.clone())?;

        tracing::debug!("completion provider initialized with model {}", config.model);

        Ok(Self::new(Box::new(provider), config.model.clone()))
    }

    pub fn new(provider: Box<dyn Provider>, model: String) -> Self {
        Self { provider, model }
    }

    /// Stream a completion for `prompt` sent as one user message
    pub async fn stream_completion(&self, prompt: String, temperature: f64) -> Result<TextStream, LlmError> {
        if !(0.0..=1.0).contains(&temperature) {
            return Err(LlmError::InvalidRequest(format!(
                "temperature must be between 0 and 1, got {temperature}"
            )));
        }

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            temperature: Some(temperature),
        };

        tracing::debug!(provider = self.provider.name(), model = %self.model, "starting completion stream");

        self.provider.complete_stream(&request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use futures_util::TryStreamExt;

    use super::*;

    #[derive(Default)]
    struct RecordingProvider {
        requests: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        async fn complete_stream(&self, request: &CompletionRequest) -> Result<TextStream, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(Box::pin(futures_util::stream::iter(vec![Ok("ok".to_owned())])))
        }
    }

    #[tokio::test]
    async fn sends_single_user_message_with_temperature() {
        let provider = RecordingProvider::default();
        let requests = Arc::clone(&provider.requests);
        let completer = Completer::new(Box::new(provider), "gpt-3.5-turbo-16k".to_owned());

        let stream = completer
            .stream_completion("Summarize: hello world".to_owned(), 0.7)
            .await
            .unwrap();
        let parts: Vec<String> = stream.try_collect().await.unwrap();

        assert_eq!(parts, ["ok"]);

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-3.5-turbo-16k");
        assert_eq!(requests[0].messages, vec![Message::user("Summarize: hello world")]);
        assert_eq!(requests[0].temperature, Some(0.7));
    }

    #[tokio::test]
    async fn out_of_range_temperature_never_reaches_provider() {
        let provider = RecordingProvider::default();
        let requests = Arc::clone(&provider.requests);
        let completer = Completer::new(Box::new(provider), "m".to_owned());

        for temperature in [-0.1, 1.5, f64::NAN] {
            let result = completer.stream_completion("p".to_owned(), temperature).await;
            assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
        }

        assert!(requests.lock().unwrap().is_empty());
    }
}
