use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, LoginRequest, UserDto, ValidJson};

/// POST /api/login
///
/// Checks email and password and returns the user. No token or session is
/// issued. Unknown email and wrong password produce the same 401.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state
        .user_service()
        .login(&payload.email, &payload.password)
        .await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(user))
}
