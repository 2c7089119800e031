#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod http_client;
mod provider;
mod server;
mod types;

pub use error::{Result, SttError};
pub use server::{Transcriber, TranscriberBuilder};
pub use types::{AudioFile, TranscriptionRequest, TranscriptionResponse};

/// Build the transcriber from configuration
///
/// # Errors
///
/// Returns an error if the configured provider cannot be initialized
pub fn build_transcriber(config: &clipscribe_config::Config) -> anyhow::Result<Transcriber> {
    TranscriberBuilder::new(&config.stt)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize STT provider: {e}"))
}
