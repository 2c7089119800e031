use secrecy::SecretString;
use serde::Deserialize;

/// Transcription provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: SttProviderType,
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model sent with every transcription
    #[serde(default = "default_model")]
    pub model: String,
    /// Source language hint (ISO 639-1)
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            provider_type: SttProviderType::default(),
            api_key: None,
            base_url: None,
            model: default_model(),
            language: default_language(),
        }
    }
}

/// Supported STT providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SttProviderType {
    /// `OpenAI` Whisper, which accepts the prompt hint and temperature
    #[default]
    Whisper,
}

fn default_model() -> String {
    "whisper-1".to_string()
}

fn default_language() -> String {
    "pt".to_string()
}
