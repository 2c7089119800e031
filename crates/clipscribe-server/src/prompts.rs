use axum::Json;
use axum::extract::State;
use clipscribe_store::Prompt;

use crate::error::ApiError;
use crate::state::AppState;

/// Handle `GET /prompts`
pub async fn list_prompts(State(state): State<AppState>) -> Result<Json<Vec<Prompt>>, ApiError> {
    let prompts = state.store.list_prompts().await?;

    Ok(Json(prompts))
}
