//! Domain service for authentication.
//!
//! Turns credentials into an [`AuthContext`] and resolves the current user
//! behind an existing one.

use thiserror::Error;

use crate::domain::AuthContext;
use crate::models::reference::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

/// Successful login: the user to show and the context to keep in the session.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub context: AuthContext,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Re-reads the user behind a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] if the user was deleted since login.
    async fn current_user(&self, context: &AuthContext) -> Result<User, AuthError>;
}
