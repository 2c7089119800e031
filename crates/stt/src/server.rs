use std::path::Path;

use clipscribe_config::{SttConfig, SttProviderType};
use secrecy::SecretString;

use crate::{
    error::SttError,
    provider::{SttProvider, whisper::WhisperProvider},
    types::{AudioFile, TranscriptionRequest, TranscriptionResponse},
};

/// Response format requested from the provider
const RESPONSE_FORMAT: &str = "json";

/// Audio uploads are MP3 files
const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Transcribes stored audio with fixed language and temperature settings
pub struct Transcriber {
    provider: Box<dyn SttProvider>,
    model: String,
    language: String,
}

impl Transcriber {
    /// Transcribe the audio file at `path`
    ///
    /// The language hint and model come from configuration; temperature is
    /// always zero. `prompt` guides vocabulary and spelling.
    pub async fn transcribe_file(&self, path: &Path, prompt: &str) -> crate::error::Result<TranscriptionResponse> {
        let filename = path
            .file_name()
            .map_or_else(|| "audio.mp3".to_owned(), |name| name.to_string_lossy().into_owned());

        let request = TranscriptionRequest {
            audio: AudioFile {
                path: path.to_path_buf(),
                filename,
                content_type: AUDIO_CONTENT_TYPE.to_owned(),
            },
            model: self.model.clone(),
            language: Some(self.language.clone()),
            prompt: Some(prompt.to_owned()),
            response_format: Some(RESPONSE_FORMAT.to_owned()),
            temperature: Some(0.0),
        };

        tracing::debug!(provider = self.provider.name(), "transcribing {}", path.display());

        self.provider.transcribe(request).await
    }

    /// Name of the configured provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

/// Builder for constructing the transcriber from configuration
pub struct TranscriberBuilder<'a> {
    config: &'a SttConfig,
}

impl<'a> TranscriberBuilder<'a> {
    pub fn new(config: &'a SttConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> crate::error::Result<Transcriber> {
        let api_key = resolve_api_key(self.config);
        let base_url = self.config.base_url.clone();

        let provider: Box<dyn SttProvider> = match self.config.provider_type {
            SttProviderType::Whisper => Box::new(WhisperProvider::new(api_key, base_url)),
        };

        if self.config.model.trim().is_empty() {
            return Err(SttError::ConfigError("stt.model must not be empty".to_owned()));
        }

        tracing::debug!(
            "STT provider initialized: {} (model={}, language={})",
            provider.name(),
            self.config.model,
            self.config.language
        );

        Ok(Transcriber {
            provider,
            model: self.config.model.clone(),
            language: self.config.language.clone(),
        })
    }
}

/// A missing key is not fatal at startup; the provider rejects the call instead
fn resolve_api_key(config: &SttConfig) -> SecretString {
    config.api_key.clone().unwrap_or_else(|| SecretString::from(""))
}
