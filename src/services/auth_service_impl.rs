//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::domain::AuthContext;
use crate::models::reference::User;
use crate::services::auth_service::{AuthError, AuthService, LoginResult};

pub struct SeaOrmAuthService {
    store: Store,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        let user = self
            .store
            .verify_user_password(username, password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let context = AuthContext::new(user.id, user.username.clone(), user.role.clone());
        Ok(LoginResult { user, context })
    }

    async fn current_user(&self, context: &AuthContext) -> Result<User, AuthError> {
        self.store
            .get_user(context.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
