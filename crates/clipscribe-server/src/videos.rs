//! Upload and transcription handlers

use std::time::Instant;

use axum::Json;
use axum::extract::multipart::{Field, Multipart, MultipartRejection};
use axum::extract::{Path, State};
use clipscribe_store::{NewVideo, Video};
use clipscribe_telemetry::metrics;
use serde::Serialize;

use crate::error::ApiError;
use crate::payload::{ExtractPayload, TranscriptionBody};
use crate::state::AppState;
use crate::upload;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub video: Video,
}

#[derive(Debug, Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

/// Handle `POST /videos`
///
/// Stores the first file field of the form and creates its `Video` record.
pub async fn upload_video(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let result = receive_upload(&state, multipart).await;

    let outcome = match &result {
        Ok(_) => "stored",
        Err(ApiError::Io(_) | ApiError::Store(_)) => "failed",
        Err(_) => "rejected",
    };
    metrics::record_upload(outcome);

    let video = result?;
    tracing::info!(video_id = %video.id, name = %video.name, "video uploaded");

    Ok(Json(UploadResponse { video }))
}

async fn receive_upload(state: &AppState, multipart: Result<Multipart, MultipartRejection>) -> Result<Video, ApiError> {
    let mut multipart = multipart?;

    while let Some(mut field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().filter(|name| !name.is_empty()).map(ToOwned::to_owned) else {
            continue;
        };

        return store_field(state, &mut field, &filename).await;
    }

    Err(ApiError::MissingFile)
}

/// Record keeps the client's filename; the file on disk is named from its base name only.
async fn store_field(state: &AppState, field: &mut Field<'_>, filename: &str) -> Result<Video, ApiError> {
    let base = upload::base_name(filename);
    state.uploads.check_extension(base)?;

    let path = state.uploads.path_for(base);

    let written = match upload::write_field(field, &path, state.uploads.max_bytes).await {
        Ok(written) => written,
        Err(err) => {
            upload::discard(&path).await;
            return Err(err);
        }
    };

    tracing::debug!(bytes = written, "wrote upload to {}", path.display());

    let record = NewVideo {
        name: filename.to_owned(),
        path: path.to_string_lossy().into_owned(),
    };

    match state.store.create_video(record).await {
        Ok(video) => Ok(video),
        Err(err) => {
            upload::discard(&path).await;
            Err(err.into())
        }
    }
}

/// Handle `POST /videos/{videoId}/transcription`
pub async fn create_transcription(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
    ExtractPayload(body): ExtractPayload<TranscriptionBody>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let video = state.store.find_video(&video_id).await?.ok_or(ApiError::VideoNotFound)?;

    let start = Instant::now();
    let result = state
        .transcriber
        .transcribe_file(std::path::Path::new(&video.path), &body.prompt)
        .await;
    metrics::record_transcription(start, state.transcriber.provider_name(), result.is_ok());

    let transcription = result?.text;

    state.store.set_transcription(&video.id, &transcription).await?;

    tracing::info!(video_id = %video.id, chars = transcription.len(), "transcription stored");

    Ok(Json(TranscriptionResponse { transcription }))
}
