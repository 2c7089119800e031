//! `OpenAI` chat completion API wire format types

use serde::{Deserialize, Serialize};

use crate::types::{CompletionRequest, Message};

/// `OpenAI` chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiRequest<'a> {
    /// Model identifier
    pub model: &'a str,
    /// Conversation messages
    pub messages: &'a [Message],
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Whether to stream the response
    pub stream: bool,
}

impl<'a> OpenAiRequest<'a> {
    pub fn streaming(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            stream: true,
        }
    }
}

/// `OpenAI` streaming chunk
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiStreamChunk {
    /// Delta choices
    #[serde(default)]
    pub choices: Vec<OpenAiStreamChoice>,
}

/// Choice within a streaming chunk
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiStreamChoice {
    /// Incremental delta
    pub delta: OpenAiStreamDelta,
}

/// Delta content within a streaming choice
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiStreamDelta {
    /// Incremental text content
    #[serde(default)]
    pub content: Option<String>,
}

impl OpenAiStreamChunk {
    /// Concatenated text carried by this chunk, if any
    pub fn text(self) -> Option<String> {
        let text: String = self
            .choices
            .into_iter()
            .filter_map(|choice| choice.delta.content)
            .collect();

        (!text.is_empty()).then_some(text)
    }
}
