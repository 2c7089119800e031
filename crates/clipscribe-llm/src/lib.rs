//! Streaming chat completions against an OpenAI-compatible provider

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod completer;
mod error;
mod protocol;
pub mod provider;
mod template;
mod types;

pub use completer::Completer;
pub use error::LlmError;
pub use provider::{Provider, TextStream};
pub use template::{TRANSCRIPTION_PLACEHOLDER, render_prompt};
pub use types::{CompletionRequest, Message, Role};
