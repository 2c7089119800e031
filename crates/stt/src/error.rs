use clipscribe_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Transcription errors
#[derive(Debug, Error)]
pub enum SttError {
    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (missing or invalid API key)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider API returned an error
    #[error("Provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Network or connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Stored audio could not be read
    #[error("Failed to read audio file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error
    /// Some(message) carries provider detail for logs, never for clients
    #[error("Internal server error")]
    InternalError(Option<String>),
}

impl SttError {
    /// Build the error for a non-success provider response
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(message),
            400 => Self::InvalidRequest(message),
            _ => Self::ProviderApiError { status, message },
        }
    }
}

/// Every transcription failure surfaces to clients as the same opaque 500
impl HttpError for SttError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn client_message(&self) -> String {
        "Internal server error.".to_owned()
    }
}
