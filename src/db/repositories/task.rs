use crate::entities::{TaskStatus, prelude::*, tasks};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// Repository for task operations
pub struct TaskRepository {
    conn: DatabaseConnection,
}

impl TaskRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a task under `project_id` after checking, in the same
    /// transaction, that the project and the optional assignee exist.
    pub async fn create_in_project(&self, project_id: i32, task: NewTask) -> Result<TaskInsert> {
        let txn = self.conn.begin().await?;

        if Projects::find_by_id(project_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(TaskInsert::ProjectMissing);
        }

        if let Some(assignee_id) = task.assignee_id
            && Users::find_by_id(assignee_id).one(&txn).await?.is_none()
        {
            txn.rollback().await?;
            return Ok(TaskInsert::AssigneeMissing(assignee_id));
        }

        let active = tasks::ActiveModel {
            title: Set(task.title),
            description: Set(task.description),
            status: Set(task.status),
            deadline: Set(task.deadline),
            project_id: Set(project_id),
            assignee_id: Set(task.assignee_id),
            ..Default::default()
        };

        let model = active.insert(&txn).await?;
        txn.commit().await.context("Failed to commit task insert")?;

        info!("Created task {} in project {}", model.id, project_id);
        Ok(TaskInsert::Created(Task::from(model)))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Task>> {
        let result = Tasks::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query task")?;
        Ok(result.map(Task::from))
    }

    pub async fn get_for_projects(&self, project_ids: &[i32]) -> Result<Vec<Task>> {
        if project_ids.is_empty() {
            return Ok(vec![]);
        }

        let rows = Tasks::find()
            .filter(tasks::Column::ProjectId.is_in(project_ids.iter().copied()))
            .order_by_asc(tasks::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to query tasks for projects")?;

        Ok(rows.into_iter().map(Task::from).collect())
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Tasks::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete task")?;
        Ok(result.rows_affected > 0)
    }
}

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    pub project_id: i32,
    pub assignee_id: Option<i32>,
}

impl From<tasks::Model> for Task {
    fn from(model: tasks::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            status: model.status,
            deadline: model.deadline,
            project_id: model.project_id,
            assignee_id: model.assignee_id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub deadline: NaiveDate,
    pub assignee_id: Option<i32>,
}

/// Outcome of [`TaskRepository::create_in_project`].
#[derive(Debug, Clone)]
pub enum TaskInsert {
    Created(Task),
    ProjectMissing,
    AssigneeMissing(i32),
}
