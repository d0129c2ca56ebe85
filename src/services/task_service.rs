//! Domain service for tasks.

use thiserror::Error;

use crate::api::types::{TaskCreate, TaskDto};

/// Errors specific to task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found")]
    NotFound(i32),

    #[error("Project not found to assign task")]
    ProjectNotFound(i32),

    #[error("Assignee {0} does not exist")]
    AssigneeNotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage failures anywhere in the chain become `Database`, whose text is
/// logged but never sent to clients.
impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.is::<sea_orm::DbErr>()) {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(err.to_string())
        }
    }
}

/// Domain service trait for tasks.
#[async_trait::async_trait]
pub trait TaskService: Send + Sync {
    /// Creates a task owned by `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::ProjectNotFound`] if the project does not exist and
    /// [`TaskError::AssigneeNotFound`] if `assignee_id` names no user. Nothing
    /// is persisted in either case.
    async fn create(&self, project_id: i32, payload: TaskCreate) -> Result<TaskDto, TaskError>;

    /// Gets a task with its assignee projection.
    async fn get(&self, id: i32) -> Result<TaskDto, TaskError>;

    async fn delete(&self, id: i32) -> Result<(), TaskError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_storage_errors_map_to_database() {
        let err = Err::<(), _>(sea_orm::DbErr::Custom("no such table: tasks".to_string()))
            .context("Failed to query task")
            .unwrap_err();
        assert!(matches!(TaskError::from(err), TaskError::Database(_)));

        let err = anyhow::anyhow!("Password hashing task panicked");
        assert!(matches!(TaskError::from(err), TaskError::Internal(_)));
    }
}
