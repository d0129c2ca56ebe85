use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::{ApiError, AppState, TaskCreate, TaskCreateQuery, TaskDto, ValidJson, ValidPath, ValidQuery};
use crate::services::TaskError;

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) | TaskError::ProjectNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            TaskError::AssigneeNotFound(_) => Self::validation(err.to_string()),
            TaskError::Database(msg) => Self::DatabaseError(msg),
            TaskError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /tasks/?project_id={id}
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ValidQuery(query): ValidQuery<TaskCreateQuery>,
    ValidJson(payload): ValidJson<TaskCreate>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state
        .task_service()
        .create(query.project_id, payload)
        .await?;
    Ok(Json(task))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<TaskDto>, ApiError> {
    let task = state.task_service().get(id).await?;
    Ok(Json(task))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, ApiError> {
    state.task_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
