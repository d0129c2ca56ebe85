use crate::entities::{prelude::*, projects, tasks};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// Repository for project operations
pub struct ProjectRepository {
    conn: DatabaseConnection,
}

impl ProjectRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, title: &str, description: Option<&str>) -> Result<Project> {
        let active = projects::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.map(ToString::to_string)),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert project")?;
        info!("Created project {}: {}", model.id, model.title);
        Ok(Project::from(model))
    }

    pub async fn get(&self, id: i32) -> Result<Option<Project>> {
        let result = Projects::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query project")?;
        Ok(result.map(Project::from))
    }

    pub async fn list_all(&self) -> Result<Vec<Project>> {
        let rows = Projects::find()
            .order_by_asc(projects::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list projects")?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Deletes the project and every task under it in one transaction.
    /// Returns `false` when the project does not exist.
    pub async fn delete_cascade(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        if Projects::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(false);
        }

        let removed_tasks = Tasks::delete_many()
            .filter(tasks::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        Projects::delete_by_id(id).exec(&txn).await?;
        txn.commit().await.context("Failed to commit project deletion")?;

        info!("Deleted project {} ({} tasks removed)", id, removed_tasks);
        Ok(true)
    }
}

// ============================================================================
// Data Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
}

impl From<projects::Model> for Project {
    fn from(model: projects::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
        }
    }
}
