pub(crate) mod whisper;

use async_trait::async_trait;
use tokio_util::io::ReaderStream;

use crate::types::{AudioFile, TranscriptionRequest, TranscriptionResponse};

/// Trait for STT provider implementations
#[async_trait]
pub(crate) trait SttProvider: Send + Sync {
    /// Transcribe audio to text
    async fn transcribe(&self, request: TranscriptionRequest) -> crate::error::Result<TranscriptionResponse>;

    /// Get the provider name
    fn name(&self) -> &str;
}

/// Open the stored audio as a streaming request body
///
/// Returns the body with the file length so providers can send a
/// `Content-Length` instead of chunked encoding.
pub(crate) async fn audio_body(audio: &AudioFile) -> crate::error::Result<(reqwest::Body, u64)> {
    let file = tokio::fs::File::open(&audio.path).await?;
    let length = file.metadata().await?.len();

    Ok((reqwest::Body::wrap_stream(ReaderStream::new(file)), length))
}

/// Read the error body of a failed provider response
pub(crate) async fn error_text(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_else(|_| "Unknown error".to_string())
}
