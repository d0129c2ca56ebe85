//! `SeaORM` implementation of the `ProjectService` trait.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::api::types::{ProjectCreate, ProjectDto, TaskDto, UserDto};
use crate::db::{Project, Store, Task};
use crate::services::project_service::{ProjectError, ProjectService};

pub struct SeaOrmProjectService {
    store: Store,
}

impl SeaOrmProjectService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Builds full projections for `projects`, batching the task and
    /// assignee lookups instead of querying per row.
    async fn project_all(&self, projects: Vec<Project>) -> Result<Vec<ProjectDto>, ProjectError> {
        let project_ids: Vec<i32> = projects.iter().map(|p| p.id).collect();
        let tasks = self.store.get_tasks_for_projects(&project_ids).await?;

        let mut assignee_ids: Vec<i32> = tasks.iter().filter_map(|t| t.assignee_id).collect();
        assignee_ids.sort_unstable();
        assignee_ids.dedup();

        let assignees: HashMap<i32, UserDto> = self
            .store
            .get_users_by_ids(&assignee_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, UserDto::from(u)))
            .collect();

        let mut tasks_by_project: HashMap<i32, Vec<Task>> = HashMap::new();
        for task in tasks {
            tasks_by_project
                .entry(task.project_id)
                .or_default()
                .push(task);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let tasks = tasks_by_project
                    .remove(&project.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|task| {
                        let assignee = task
                            .assignee_id
                            .and_then(|id| assignees.get(&id).cloned());
                        TaskDto::new(task, assignee)
                    })
                    .collect();
                ProjectDto::new(project, tasks)
            })
            .collect())
    }
}

#[async_trait]
impl ProjectService for SeaOrmProjectService {
    async fn create(&self, payload: ProjectCreate) -> Result<ProjectDto, ProjectError> {
        let project = self
            .store
            .create_project(&payload.title, payload.description.as_deref())
            .await?;

        // A freshly created project owns no tasks yet.
        Ok(ProjectDto::new(project, vec![]))
    }

    async fn list(&self) -> Result<Vec<ProjectDto>, ProjectError> {
        let projects = self.store.list_projects().await?;
        self.project_all(projects).await
    }

    async fn get(&self, id: i32) -> Result<ProjectDto, ProjectError> {
        let project = self
            .store
            .get_project(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;

        self.project_all(vec![project])
            .await?
            .pop()
            .ok_or_else(|| ProjectError::Internal(format!("Projection of project {id} vanished")))
    }

    async fn delete(&self, id: i32) -> Result<(), ProjectError> {
        if self.store.delete_project(id).await? {
            Ok(())
        } else {
            Err(ProjectError::NotFound(id))
        }
    }
}
