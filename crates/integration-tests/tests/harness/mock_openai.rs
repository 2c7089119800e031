//! Mock OpenAI backend for integration tests
//!
//! Serves `/v1/audio/transcriptions` and streaming `/v1/chat/completions`,
//! recording what it receives

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// One transcription request as seen by the provider
#[derive(Debug, Clone, Default)]
pub struct RecordedTranscription {
    pub fields: HashMap<String, String>,
    pub filename: Option<String>,
    pub audio_len: usize,
}

/// Mock backend that returns predictable responses
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    transcript: String,
    tokens: Vec<String>,
    fail: AtomicBool,
    break_stream: AtomicBool,
    transcription_count: AtomicU32,
    completion_count: AtomicU32,
    transcriptions: Mutex<Vec<RecordedTranscription>>,
    completions: Mutex<Vec<serde_json::Value>>,
}

impl MockOpenAi {
    /// Start a mock that transcribes every file as `transcript` and
    /// streams `tokens` for every completion
    pub async fn start(transcript: &str, tokens: &[&str]) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            transcript: transcript.to_owned(),
            tokens: tokens.iter().map(|t| (*t).to_owned()).collect(),
            fail: AtomicBool::new(false),
            break_stream: AtomicBool::new(false),
            transcription_count: AtomicU32::new(0),
            completion_count: AtomicU32::new(0),
            transcriptions: Mutex::new(Vec::new()),
            completions: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL including `/v1`, as the providers append their paths
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Answer every following request with 500
    pub fn fail_requests(&self) {
        self.state.fail.store(true, Ordering::Relaxed);
    }

    /// Drop the connection after streaming the first completion token
    pub fn break_stream_after_first_token(&self) {
        self.state.break_stream.store(true, Ordering::Relaxed);
    }

    pub fn transcription_count(&self) -> u32 {
        self.state.transcription_count.load(Ordering::Relaxed)
    }

    pub fn completion_count(&self) -> u32 {
        self.state.completion_count.load(Ordering::Relaxed)
    }

    pub fn transcriptions(&self) -> Vec<RecordedTranscription> {
        self.state.transcriptions.lock().unwrap().clone()
    }

    /// Raw JSON bodies of the chat completion requests
    pub fn completions(&self) -> Vec<serde_json::Value> {
        self.state.completions.lock().unwrap().clone()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(State(state): State<Arc<MockState>>, mut multipart: Multipart) -> impl IntoResponse {
    state.transcription_count.fetch_add(1, Ordering::Relaxed);

    let mut recorded = RecordedTranscription::default();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_owned();
        if name == "file" {
            recorded.filename = field.file_name().map(ToOwned::to_owned);
            recorded.audio_len = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        } else {
            let value = field.text().await.unwrap_or_default();
            recorded.fields.insert(name, value);
        }
    }
    state.transcriptions.lock().unwrap().push(recorded);

    if state.fail.load(Ordering::Relaxed) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": { "message": "mock failure" } })),
        )
            .into_response();
    }

    Json(serde_json::json!({ "text": state.transcript })).into_response()
}

async fn handle_chat_completions(
    State(state): State<Arc<MockState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.completion_count.fetch_add(1, Ordering::Relaxed);
    state.completions.lock().unwrap().push(body);

    if state.fail.load(Ordering::Relaxed) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": { "message": "mock failure" } })),
        )
            .into_response();
    }

    let events: Vec<String> = state.tokens.iter().map(|token| sse_chunk(token)).collect();

    if state.break_stream.load(Ordering::Relaxed) {
        let first = events.into_iter().take(1).map(Ok);
        let reset = std::iter::once(Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "mock connection reset",
        )));
        let body = Body::from_stream(futures_util::stream::iter(first.chain(reset)));

        return ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response();
    }

    let mut body = events.concat();
    body.push_str("data: [DONE]\n\n");

    ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
}

fn sse_chunk(token: &str) -> String {
    let chunk = serde_json::json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion.chunk",
        "choices": [{ "index": 0, "delta": { "content": token } }]
    });
    format!("data: {chunk}\n\n")
}
