use clipscribe_core::HttpError;
use http::StatusCode;
use thiserror::Error;

/// Errors that can occur during completion requests
#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream provider returned an error
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Error during streaming response
    #[error("streaming error: {0}")]
    Streaming(String),

    /// Request rejected before it was sent
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider could not be constructed from configuration
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) | Self::Streaming(_) | Self::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => message.clone(),
            _ => "Internal server error.".to_owned(),
        }
    }
}
