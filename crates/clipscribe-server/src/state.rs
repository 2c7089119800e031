use std::sync::Arc;

use clipscribe_llm::Completer;
use clipscribe_store::RecordStore;
use http::HeaderValue;
use stt::Transcriber;

use crate::upload::UploadSettings;

/// Shared state for route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub transcriber: Arc<Transcriber>,
    pub completer: Arc<Completer>,
    pub uploads: Arc<UploadSettings>,
    /// `Access-Control-Allow-Origin` value for completion streams
    pub stream_origin: HeaderValue,
}
