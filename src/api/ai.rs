use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::warn;

use super::validation::validate_project_description;
use super::{ApiError, AppState, UserStoriesRequest, ValidJson};
use crate::clients::ResponseFormat;

/// POST /api/ai/generate-user-stories
///
/// Forwards the description to the text generator once and returns its
/// output unchanged, as a JSON string. Every generator failure, whatever its
/// cause, becomes a 500 carrying the failure message. Storage is never
/// touched.
pub async fn generate_user_stories(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<UserStoriesRequest>,
) -> Result<Json<String>, ApiError> {
    let description = validate_project_description(&payload.project_description)?;

    let output = state
        .story_generator()
        .generate(
            &state.config().ai.system_prompt,
            description,
            ResponseFormat::JsonObject,
        )
        .await
        .map_err(|e| {
            warn!(error = ?e, "User story generation failed");
            ApiError::internal(e.to_string())
        })?;

    Ok(Json(output))
}
