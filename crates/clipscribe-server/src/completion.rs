use std::time::Instant;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use clipscribe_llm::render_prompt;
use clipscribe_telemetry::metrics;
use futures_util::{Stream, TryStreamExt};
use http::HeaderValue;
use http::header::{ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};

use crate::error::ApiError;
use crate::payload::{CompletionBody, ExtractPayload};
use crate::state::AppState;

static TEXT_PLAIN: HeaderValue = HeaderValue::from_static("text/plain; charset=utf-8");
static ALLOWED_METHODS: HeaderValue = HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS");

/// Handle `POST /videos/{videoId}/complete`
///
/// Fills the transcript into the prompt template and relays the provider's
/// text stream as it arrives.
pub async fn complete_video(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    ExtractPayload(body): ExtractPayload<CompletionBody>,
) -> Result<Response, ApiError> {
    let video = state.store.find_video(&video_id).await?.ok_or(ApiError::VideoNotFound)?;
    let transcript = video.transcript().ok_or(ApiError::TranscriptionMissing)?;

    let prompt = render_prompt(&body.prompt, transcript);

    let start = Instant::now();
    let stream = state.completer.stream_completion(prompt, body.temperature()).await?;
    let stream = on_first_chunk(stream, move || metrics::record_time_to_first_token(start));

    let video_id = video.id.clone();
    let stream = stream.inspect_err(move |e| {
        tracing::warn!(%video_id, "completion stream ended early: {e}");
    });

    Ok((
        [
            (CONTENT_TYPE, TEXT_PLAIN.clone()),
            (ACCESS_CONTROL_ALLOW_ORIGIN, state.stream_origin.clone()),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS.clone()),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// Run `f` once, when the first chunk of text arrives
fn on_first_chunk<S, T, E, F>(stream: S, f: F) -> impl Stream<Item = Result<T, E>>
where
    S: Stream<Item = Result<T, E>>,
    F: FnOnce(),
{
    let mut pending = Some(f);
    stream.inspect_ok(move |_| {
        if let Some(f) = pending.take() {
            f();
        }
    })
}
