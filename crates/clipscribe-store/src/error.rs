use clipscribe_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Record store failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id
    #[error("record not found: {0}")]
    NotFound(String),

    /// The database rejected the operation
    #[error("database error: {0}")]
    Database(String),

    /// The blocking worker running the query panicked or was cancelled
    #[error("store task failed: {0}")]
    Task(String),
}

impl HttpError for StoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Video not found.".to_owned(),
            Self::Database(_) | Self::Task(_) => "Internal server error.".to_owned(),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}
