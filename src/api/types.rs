//! Transfer schemas: what the HTTP surface accepts and returns.
//!
//! Output types are projections of repository rows. None of them has a slot
//! for a password or its digest.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::{Project, Task, User};
use crate::entities::{TaskStatus, UserRole};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub password: String,
}

/// Login payload. Clients historically send the full registration shape;
/// `name` and `role` are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProjectCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub tasks: Vec<TaskDto>,
}

impl ProjectDto {
    #[must_use]
    pub fn new(project: Project, tasks: Vec<TaskDto>) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            tasks,
        }
    }
}

// ============================================================================
// Tasks
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assignee_id: Option<i32>,
}

/// `POST /tasks/?project_id=N`: the owning project travels in the query
/// string, not in the body.
#[derive(Debug, Deserialize)]
pub struct TaskCreateQuery {
    pub project_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDto {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub deadline: NaiveDate,
    pub status: TaskStatus,
    pub project_id: i32,
    pub assignee: Option<UserDto>,
}

impl TaskDto {
    #[must_use]
    pub fn new(task: Task, assignee: Option<UserDto>) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            deadline: task.deadline,
            status: task.status,
            project_id: task.project_id,
            assignee,
        }
    }
}

// ============================================================================
// AI
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UserStoriesRequest {
    #[serde(rename = "projectDescription")]
    pub project_description: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_projection_has_no_password_field() {
        let dto = UserDto::from(User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: UserRole::Admin,
        });
        let json = serde_json::to_value(&dto).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 4);
        assert!(json.get("password").is_none());
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_task_create_defaults() {
        let payload: TaskCreate =
            serde_json::from_str(r#"{"title":"Write docs","deadline":"2026-11-01"}"#).unwrap();
        assert_eq!(payload.status, TaskStatus::Todo);
        assert!(payload.description.is_none());
        assert!(payload.assignee_id.is_none());
    }

    #[test]
    fn test_task_create_rejects_bad_shapes() {
        // missing deadline
        assert!(serde_json::from_str::<TaskCreate>(r#"{"title":"x"}"#).is_err());
        // deadline not a date
        assert!(
            serde_json::from_str::<TaskCreate>(r#"{"title":"x","deadline":"tomorrow"}"#).is_err()
        );
        // title of the wrong primitive type
        assert!(
            serde_json::from_str::<TaskCreate>(r#"{"title":5,"deadline":"2026-01-01"}"#).is_err()
        );
    }

    #[test]
    fn test_login_ignores_registration_fields() {
        let payload: LoginRequest = serde_json::from_str(
            r#"{"email":"a@b.c","password":"pw","name":"A","role":"developer"}"#,
        )
        .unwrap();
        assert_eq!(payload.email, "a@b.c");
    }

    #[test]
    fn test_task_projection_serializes_deadline_as_date() {
        let dto = TaskDto::new(
            Task {
                id: 3,
                title: "t".to_string(),
                description: None,
                status: TaskStatus::Done,
                deadline: NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
                project_id: 9,
                assignee_id: None,
            },
            None,
        );
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["deadline"], "2026-02-28");
        assert_eq!(json["status"], "done");
        assert!(json["assignee"].is_null());
    }
}
