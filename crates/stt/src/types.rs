use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Audio stored on local disk, streamed to the provider on demand
#[derive(Debug, Clone)]
pub struct AudioFile {
    /// Location of the stored file
    pub path: PathBuf,
    /// Filename reported to the provider
    pub filename: String,
    /// MIME type of the audio
    pub content_type: String,
}

/// Transcription request following `OpenAI` Whisper API format
#[derive(Debug, Clone)]
pub struct TranscriptionRequest {
    /// Audio to transcribe
    pub audio: AudioFile,
    /// Model identifier (e.g. "whisper-1" or "nova-2")
    pub model: String,
    /// Optional language hint (ISO 639-1)
    pub language: Option<String>,
    /// Optional prompt to guide transcription
    pub prompt: Option<String>,
    /// Response format (json, text, srt, `verbose_json`, vtt)
    pub response_format: Option<String>,
    /// Sampling temperature (0-1)
    pub temperature: Option<f32>,
}

/// Transcription response following `OpenAI` Whisper API format
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    /// Transcribed text
    pub text: String,
}
