//! Domain service for registration, login and user listing.

use thiserror::Error;

use crate::api::types::{UserCreate, UserDto};

/// Errors specific to user operations.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Email already registered")]
    EmailTaken(String),

    /// Unknown email and wrong password map to this one variant.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Storage failures anywhere in the chain become `Database`, whose text is
/// logged but never sent to clients.
impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.is::<sea_orm::DbErr>()) {
            Self::Database(format!("{err:#}"))
        } else {
            Self::Internal(err.to_string())
        }
    }
}

/// Domain service trait for users.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Registers a new user, storing only the password digest.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::EmailTaken`] when the email is already registered,
    /// including when a concurrent registration wins the race.
    async fn register(&self, payload: UserCreate) -> Result<UserDto, UserError>;

    /// Verifies credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidCredentials`] for an unknown email or a wrong password.
    async fn login(&self, email: &str, password: &str) -> Result<UserDto, UserError>;

    async fn list(&self) -> Result<Vec<UserDto>, UserError>;
}
