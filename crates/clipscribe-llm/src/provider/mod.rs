//! Provider trait and implementations for completion backends

pub mod openai;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::error::LlmError;
use crate::types::CompletionRequest;

/// Stream of generated text fragments in arrival order
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// Trait implemented by each completion backend
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Send a streaming completion request
    ///
    /// Resolves once the provider has accepted the request; generated text
    /// then arrives through the returned stream.
    async fn complete_stream(&self, request: &CompletionRequest) -> Result<TextStream, LlmError>;
}
