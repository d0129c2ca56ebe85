//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::types::{UserCreate, UserDto};
use crate::config::SecurityConfig;
use crate::db::Store;
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

/// True when the error chain bottoms out in a unique-constraint violation.
fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sea_orm::DbErr>()
            .and_then(sea_orm::DbErr::sql_err),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register(&self, payload: UserCreate) -> Result<UserDto, UserError> {
        if self.store.user_email_exists(&payload.email).await? {
            return Err(UserError::EmailTaken(payload.email));
        }

        // The pre-check above can lose a race; the unique index is the backstop.
        let user = match self
            .store
            .create_user(
                &payload.name,
                &payload.email,
                payload.role,
                &payload.password,
                &self.security,
            )
            .await
        {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => {
                warn!("Concurrent registration for {} rejected", payload.email);
                return Err(UserError::EmailTaken(payload.email));
            }
            Err(e) => return Err(e.into()),
        };

        info!("Registered user {} ({})", user.id, user.role);
        Ok(UserDto::from(user))
    }

    async fn login(&self, email: &str, password: &str) -> Result<UserDto, UserError> {
        let user = self
            .store
            .verify_user_credentials(email, password, &self.security)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        Ok(UserDto::from(user))
    }

    async fn list(&self) -> Result<Vec<UserDto>, UserError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::UserRole;

    async fn service() -> SeaOrmUserService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let security = SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            argon2_parallelism: 1,
        };
        SeaOrmUserService::new(store, security)
    }

    fn payload(email: &str) -> UserCreate {
        UserCreate {
            name: "Grace".to_string(),
            email: email.to_string(),
            role: UserRole::Developer,
            password: "correct horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service().await;
        let created = service.register(payload("grace@example.com")).await.unwrap();

        let logged_in = service
            .login("grace@example.com", "correct horse")
            .await
            .unwrap();
        assert_eq!(created, logged_in);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let service = service().await;
        service.register(payload("dup@example.com")).await.unwrap();

        let err = service
            .register(payload("dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::EmailTaken(_)));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = service().await;
        service.register(payload("grace@example.com")).await.unwrap();

        let wrong_password = service
            .login("grace@example.com", "battery staple")
            .await
            .unwrap_err();
        let unknown_email = service
            .login("nobody@example.com", "correct horse")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, UserError::InvalidCredentials));
        assert!(matches!(unknown_email, UserError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn test_unique_violation_detection_ignores_other_errors() {
        let err = anyhow::Error::from(sea_orm::DbErr::Custom("boom".to_string()));
        assert!(!is_unique_violation(&err));
        assert!(!is_unique_violation(&anyhow::anyhow!("plain")));
    }
}
