use crate::config::SecurityConfig;
use crate::entities::UserRole;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::project::Project;
pub use repositories::task::{NewTask, Task, TaskInsert};
pub use repositories::user::User;

/// Persistence context handed to every service.
///
/// Cloning is cheap: the clone shares the underlying connection pool. Each
/// call checks one connection out of the pool and returns it when the call
/// finishes, on success and on error alike.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Every in-memory connection is its own database, so the pool must
        // hold exactly one connection for the lifetime of the store.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
            (max_connections, min_connections)
        };
        opt.max_connections(max_connections)
            .min_connections(min_connections);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn project_repo(&self) -> repositories::project::ProjectRepository {
        repositories::project::ProjectRepository::new(self.conn.clone())
    }

    fn task_repo(&self) -> repositories::task::TaskRepository {
        repositories::task::TaskRepository::new(self.conn.clone())
    }

    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        role: UserRole,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo()
            .create(name, email, role, password, security)
            .await
    }

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_users_by_ids(&self, ids: &[i32]) -> Result<Vec<User>> {
        self.user_repo().get_by_ids(ids).await
    }

    pub async fn user_email_exists(&self, email: &str) -> Result<bool> {
        self.user_repo().email_exists(email).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn verify_user_credentials(
        &self,
        email: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<Option<User>> {
        self.user_repo()
            .verify_credentials(email, password, security)
            .await
    }

    pub async fn create_project(&self, title: &str, description: Option<&str>) -> Result<Project> {
        self.project_repo().create(title, description).await
    }

    pub async fn get_project(&self, id: i32) -> Result<Option<Project>> {
        self.project_repo().get(id).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.project_repo().list_all().await
    }

    pub async fn delete_project(&self, id: i32) -> Result<bool> {
        self.project_repo().delete_cascade(id).await
    }

    pub async fn create_task(&self, project_id: i32, task: NewTask) -> Result<TaskInsert> {
        self.task_repo().create_in_project(project_id, task).await
    }

    pub async fn get_task(&self, id: i32) -> Result<Option<Task>> {
        self.task_repo().get(id).await
    }

    pub async fn get_tasks_for_projects(&self, project_ids: &[i32]) -> Result<Vec<Task>> {
        self.task_repo().get_for_projects(project_ids).await
    }

    pub async fn remove_task(&self, id: i32) -> Result<bool> {
        self.task_repo().remove(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TaskStatus;
    use chrono::NaiveDate;

    async fn memory_store() -> Store {
        Store::new("sqlite::memory:").await.unwrap()
    }

    fn cheap_security() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        }
    }

    fn new_task(title: &str, assignee_id: Option<i32>) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: None,
            status: TaskStatus::Todo,
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            assignee_id,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_hits_unique_constraint() {
        let store = memory_store().await;
        let security = cheap_security();

        store
            .create_user("Ada", "ada@example.com", UserRole::Admin, "pw", &security)
            .await
            .unwrap();
        let err = store
            .create_user("Ada 2", "ada@example.com", UserRole::Developer, "pw", &security)
            .await
            .unwrap_err();

        let sql_err = err
            .downcast_ref::<sea_orm::DbErr>()
            .and_then(sea_orm::DbErr::sql_err);
        assert!(matches!(
            sql_err,
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
        ));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let store = memory_store().await;
        let security = cheap_security();
        let user = store
            .create_user("Lin", "lin@example.com", UserRole::Manager, "s3cret", &security)
            .await
            .unwrap();

        let found = store
            .verify_user_credentials("lin@example.com", "s3cret", &security)
            .await
            .unwrap();
        assert_eq!(found, Some(user));

        assert!(
            store
                .verify_user_credentials("lin@example.com", "wrong", &security)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .verify_user_credentials("nobody@example.com", "s3cret", &security)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_unknown_email_costs_as_much_as_wrong_password() {
        let store = memory_store().await;
        let security = SecurityConfig {
            argon2_memory_cost_kib: 4096,
            argon2_time_cost: 2,
            argon2_parallelism: 1,
        };
        store
            .create_user("Kim", "kim@example.com", UserRole::Developer, "s3cret", &security)
            .await
            .unwrap();

        let start = std::time::Instant::now();
        let wrong_password = store
            .verify_user_credentials("kim@example.com", "nope", &security)
            .await
            .unwrap();
        let wrong_password_time = start.elapsed();

        let start = std::time::Instant::now();
        let unknown_email = store
            .verify_user_credentials("ghost@example.com", "nope", &security)
            .await
            .unwrap();
        let unknown_email_time = start.elapsed();

        assert!(wrong_password.is_none());
        assert!(unknown_email.is_none());
        assert!(
            unknown_email_time * 4 >= wrong_password_time,
            "unknown email answered in {unknown_email_time:?}, wrong password in {wrong_password_time:?}"
        );
    }

    #[tokio::test]
    async fn test_delete_project_cascades_to_tasks() {
        let store = memory_store().await;
        let keep = store.create_project("Keep", None).await.unwrap();
        let doomed = store.create_project("Doomed", Some("bye")).await.unwrap();

        let TaskInsert::Created(kept_task) =
            store.create_task(keep.id, new_task("stays", None)).await.unwrap()
        else {
            panic!("expected task to be created");
        };
        let mut doomed_ids = vec![];
        for title in ["a", "b"] {
            if let TaskInsert::Created(task) =
                store.create_task(doomed.id, new_task(title, None)).await.unwrap()
            {
                doomed_ids.push(task.id);
            }
        }
        assert_eq!(doomed_ids.len(), 2);

        assert!(store.delete_project(doomed.id).await.unwrap());
        assert!(!store.delete_project(doomed.id).await.unwrap());

        for id in doomed_ids {
            assert!(store.get_task(id).await.unwrap().is_none());
        }
        assert_eq!(store.get_task(kept_task.id).await.unwrap(), Some(kept_task));
    }

    #[tokio::test]
    async fn test_create_task_checks_references() {
        let store = memory_store().await;
        let project = store.create_project("P", None).await.unwrap();

        let missing_project = store.create_task(999, new_task("x", None)).await.unwrap();
        assert!(matches!(missing_project, TaskInsert::ProjectMissing));

        let missing_user = store
            .create_task(project.id, new_task("x", Some(42)))
            .await
            .unwrap();
        assert!(matches!(missing_user, TaskInsert::AssigneeMissing(42)));

        assert!(
            store
                .get_tasks_for_projects(&[project.id])
                .await
                .unwrap()
                .is_empty()
        );
    }
}
