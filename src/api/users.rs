use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState, UserCreate, UserDto, ValidJson};
use crate::services::UserError;

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => Self::Conflict(err.to_string()),
            UserError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /users/
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<UserCreate>,
) -> Result<Json<UserDto>, ApiError> {
    let user = state.user_service().register(payload).await?;
    Ok(Json(user))
}

/// GET /users/
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = state.user_service().list().await?;
    Ok(Json(users))
}
