//! `SeaORM` implementation of the `TaskService` trait.

use async_trait::async_trait;

use crate::api::types::{TaskCreate, TaskDto, UserDto};
use crate::db::{NewTask, Store, Task, TaskInsert};
use crate::services::task_service::{TaskError, TaskService};

pub struct SeaOrmTaskService {
    store: Store,
}

impl SeaOrmTaskService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn project(&self, task: Task) -> Result<TaskDto, TaskError> {
        let assignee = match task.assignee_id {
            Some(id) => self.store.get_user(id).await?.map(UserDto::from),
            None => None,
        };
        Ok(TaskDto::new(task, assignee))
    }
}

#[async_trait]
impl TaskService for SeaOrmTaskService {
    async fn create(&self, project_id: i32, payload: TaskCreate) -> Result<TaskDto, TaskError> {
        let new_task = NewTask {
            title: payload.title,
            description: payload.description,
            status: payload.status,
            deadline: payload.deadline,
            assignee_id: payload.assignee_id,
        };

        match self.store.create_task(project_id, new_task).await? {
            TaskInsert::Created(task) => self.project(task).await,
            TaskInsert::ProjectMissing => Err(TaskError::ProjectNotFound(project_id)),
            TaskInsert::AssigneeMissing(id) => Err(TaskError::AssigneeNotFound(id)),
        }
    }

    async fn get(&self, id: i32) -> Result<TaskDto, TaskError> {
        let task = self
            .store
            .get_task(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;
        self.project(task).await
    }

    async fn delete(&self, id: i32) -> Result<(), TaskError> {
        if self.store.remove_task(id).await? {
            Ok(())
        } else {
            Err(TaskError::NotFound(id))
        }
    }
}
