//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use clipscribe_config::{
    Config, CorsConfig, HealthConfig, LlmConfig, ServerConfig, StorageConfig, SttConfig,
};
use secrecy::SecretString;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal config storing uploads under `upload_dir` and records in memory
    pub fn new(upload_dir: &Path) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                storage: StorageConfig {
                    database_path: ":memory:".into(),
                    upload_dir: upload_dir.to_path_buf(),
                    ..StorageConfig::default()
                },
                stt: SttConfig::default(),
                llm: LlmConfig::default(),
                telemetry: None,
            },
        }
    }

    /// Point both providers at a mock OpenAI backend
    pub fn with_openai(mut self, base_url: &str) -> Self {
        self.config.stt.api_key = Some(SecretString::from("test-key"));
        self.config.stt.base_url = Some(base_url.to_owned());
        self.config.llm.api_key = Some(SecretString::from("test-key"));
        self.config.llm.base_url = Some(base_url.parse().expect("valid URL"));
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Cap uploads at `bytes`
    pub fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.config.storage.max_upload_bytes = bytes;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
