//! Domain service for projects and their nested task projections.

use thiserror::Error;

use crate::api::types::{ProjectCreate, ProjectDto};

/// Errors specific to project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Project not found")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage failures anywhere in the chain become `Database`, whose text is
/// logged but never sent to clients.
impl From<anyhow::Error> for ProjectError {
    fn from(err: anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.is::<sea_orm::DbErr>()) {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(err.to_string())
        }
    }
}

/// Domain service trait for projects.
#[async_trait::async_trait]
pub trait ProjectService: Send + Sync {
    async fn create(&self, payload: ProjectCreate) -> Result<ProjectDto, ProjectError>;

    async fn list(&self) -> Result<Vec<ProjectDto>, ProjectError>;

    /// Gets a project with all of its tasks.
    async fn get(&self, id: i32) -> Result<ProjectDto, ProjectError>;

    /// Deletes a project together with every task it owns.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotFound`] if the project does not exist.
    async fn delete(&self, id: i32) -> Result<(), ProjectError>;
}
