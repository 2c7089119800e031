#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod health;
pub mod llm;
mod loader;
pub mod server;
pub mod storage;
pub mod stt;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use health::*;
pub use llm::*;
pub use server::*;
pub use storage::*;
pub use stt::*;
pub use telemetry::{ExportProtocol, ExporterConfig, TelemetryConfig, TracingConfig};

/// Top-level Clipscribe configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Record store and upload directory
    #[serde(default)]
    pub storage: StorageConfig,
    /// Transcription provider
    #[serde(default)]
    pub stt: SttConfig,
    /// Completion provider
    #[serde(default)]
    pub llm: LlmConfig,
    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
