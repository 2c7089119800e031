//! Record store for prompt templates and uploaded videos

#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod records;
mod sqlite;

use async_trait::async_trait;

pub use error::{Result, StoreError};
pub use records::{NewPrompt, NewVideo, Prompt, Video};
pub use sqlite::SqliteStore;

/// Persistence operations the HTTP handlers depend on
///
/// Implementations serialize conflicting writes themselves; callers share
/// one instance across all requests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All prompt templates in creation order
    async fn list_prompts(&self) -> Result<Vec<Prompt>>;

    /// Insert a prompt template
    async fn create_prompt(&self, prompt: NewPrompt) -> Result<Prompt>;

    /// Insert a video with no transcription
    async fn create_video(&self, video: NewVideo) -> Result<Video>;

    /// Look up a video by id
    async fn find_video(&self, id: &str) -> Result<Option<Video>>;

    /// Store the transcription text, replacing any previous value
    async fn set_transcription(&self, id: &str, transcription: &str) -> Result<Video>;

    /// All videos in creation order
    async fn list_videos(&self) -> Result<Vec<Video>>;
}
