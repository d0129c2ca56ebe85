use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::{ApiError, AppState, ProjectCreate, ProjectDto, ValidJson, ValidPath};
use crate::services::ProjectError;

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(_) => Self::NotFound(err.to_string()),
            ProjectError::Database(msg) => Self::DatabaseError(msg),
            ProjectError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /projects/
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ValidJson(payload): ValidJson<ProjectCreate>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state.project_service().create(payload).await?;
    Ok(Json(project))
}

/// GET /projects/
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProjectDto>>, ApiError> {
    let projects = state.project_service().list().await?;
    Ok(Json(projects))
}

/// GET /projects/{id}
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<Json<ProjectDto>, ApiError> {
    let project = state.project_service().get(id).await?;
    Ok(Json(project))
}

/// DELETE /projects/{id}
///
/// Removes the project and all of its tasks.
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    ValidPath(id): ValidPath<i32>,
) -> Result<StatusCode, ApiError> {
    state.project_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
