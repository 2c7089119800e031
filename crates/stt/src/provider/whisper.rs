use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    error::SttError,
    http_client::http_client,
    types::{TranscriptionRequest, TranscriptionResponse},
};

use super::{SttProvider, audio_body, error_text};

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// `OpenAI` Whisper STT provider
pub(crate) struct WhisperProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl WhisperProvider {
    pub fn new(api_key: SecretString, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_string());

        Self {
            client: http_client(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
        }
    }
}

#[derive(serde::Deserialize)]
struct WhisperResponse {
    text: String,
}

#[async_trait]
impl SttProvider for WhisperProvider {
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResponse> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let (body, length) = audio_body(&request.audio).await?;

        tracing::debug!(
            "Whisper transcription request: {length} bytes from {}, model={}",
            request.audio.path.display(),
            request.model,
        );

        let file_part = Part::stream_with_length(body, length)
            .file_name(request.audio.filename)
            .mime_str(&request.audio.content_type)
            .map_err(|e| SttError::InvalidRequest(format!("Invalid content type: {e}")))?;

        let mut form = Form::new().part("file", file_part).text("model", request.model);

        if let Some(language) = request.language {
            form = form.text("language", language);
        }

        if let Some(prompt) = request.prompt {
            form = form.text("prompt", prompt);
        }

        if let Some(response_format) = request.response_format {
            form = form.text("response_format", response_format);
        }

        if let Some(temperature) = request.temperature {
            form = form.text("temperature", temperature.to_string());
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Whisper request failed: {e}");
                SttError::ConnectionError(format!("Failed to send request to Whisper: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = error_text(response).await;
            tracing::error!("Whisper API error ({status}): {error_text}");
            return Err(SttError::from_status(status.as_u16(), error_text));
        }

        let result: WhisperResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Whisper response: {e}");
            SttError::InternalError(Some(e.to_string()))
        })?;

        tracing::debug!("Whisper transcription complete");

        Ok(TranscriptionResponse { text: result.text })
    }

    fn name(&self) -> &str {
        "whisper"
    }
}
