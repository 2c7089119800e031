use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::response::{IntoResponse, Response};
use clipscribe_core::HttpError;
use clipscribe_llm::LlmError;
use clipscribe_store::StoreError;
use http::StatusCode;
use stt::SttError;
use thiserror::Error;

/// Every failure a handler can answer with
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing file input.")]
    MissingFile,

    #[error("Invalid input type, please upload a {0} file.")]
    InvalidFileType(String),

    #[error("File exceeds the upload limit of {0} bytes.")]
    FileTooLarge(u64),

    #[error("Video not found.")]
    VideoNotFound,

    #[error("Video transcription was not generated yet.")]
    TranscriptionMissing,

    /// Request body or form could not be accepted
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("transcription failed: {0}")]
    Transcription(#[from] SttError),

    #[error("completion failed: {0}")]
    Completion(#[from] LlmError),

    #[error("upload i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::rejected(err.status(), err.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl HttpError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::InvalidFileType(_) | Self::TranscriptionMissing => StatusCode::BAD_REQUEST,
            Self::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::VideoNotFound => StatusCode::NOT_FOUND,
            Self::Rejected { status, .. } => *status,
            Self::Store(err) => err.status_code(),
            Self::Transcription(err) => err.status_code(),
            Self::Completion(err) => err.status_code(),
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::Store(err) => err.client_message(),
            Self::Transcription(err) => err.client_message(),
            Self::Completion(err) => err.client_message(),
            Self::Io(_) => "Internal server error.".to_owned(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }

        (status, Json(self.to_body())).into_response()
    }
}
