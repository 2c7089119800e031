use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if upload limits, extensions or sampling settings are invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_storage_config()?;
        self.validate_telemetry_config()?;
        self.warn_missing_credentials();
        Ok(())
    }

    fn validate_storage_config(&self) -> anyhow::Result<()> {
        if self.storage.max_upload_bytes == 0 {
            anyhow::bail!("storage.max_upload_bytes must be greater than 0");
        }

        if self.storage.allowed_extensions.is_empty() {
            anyhow::bail!("storage.allowed_extensions must list at least one extension");
        }

        for extension in &self.storage.allowed_extensions {
            if !extension.starts_with('.') || extension.len() < 2 {
                anyhow::bail!("invalid upload extension '{extension}', expected a form like '.mp3'");
            }
        }

        Ok(())
    }

    fn validate_telemetry_config(&self) -> anyhow::Result<()> {
        let sampling_rate = self
            .telemetry
            .as_ref()
            .and_then(|t| t.tracing.as_ref())
            .map(|t| t.sampling_rate);

        if let Some(rate) = sampling_rate
            && !(0.0..=1.0).contains(&rate)
        {
            anyhow::bail!("telemetry.tracing.sampling_rate must be between 0.0 and 1.0, got {rate}");
        }

        Ok(())
    }

    /// Credentials are optional at load time; providers reject calls without them
    fn warn_missing_credentials(&self) {
        if self.stt.api_key.is_none() {
            tracing::warn!("no stt.api_key configured, transcription requests will fail");
        }
        if self.llm.api_key.is_none() {
            tracing::warn!("no llm.api_key configured, completion requests may be rejected upstream");
        }
    }
}
