use axum::{
    Extension, Json,
    extract::{Request, State, rejection::JsonRejection},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState, MessageResponse};
use crate::constants::session::AUTH_KEY;
use crate::domain::AuthContext;
use crate::models::reference::User;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects requests without a logged-in session and makes the caller's
/// [`AuthContext`] available to handlers as a request extension.
pub async fn auth_middleware(
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let context = session
        .get::<AuthContext>(AUTH_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to read session: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    tracing::Span::current().record("user_id", context.user_id);
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// Must run inside [`auth_middleware`].
pub async fn require_admin(
    Extension(context): Extension<AuthContext>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !context.is_admin() {
        tracing::warn!(actor = %context, path = %request.uri().path(), "Admin route denied");
        return Err(ApiError::Forbidden("Admin role required".to_string()));
    }

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let Json(payload) = payload?;

    let result = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await
        .inspect_err(|_| tracing::warn!(username = %payload.username, "Login failed"))?;

    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to rotate session: {e}")))?;
    session
        .insert(AUTH_KEY, &result.context)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!(actor = %result.context, "User logged in");

    Ok(Json(result.user))
}

/// POST /auth/logout
pub async fn logout(session: Session) -> Result<Json<MessageResponse>, ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to end session: {e}")))?;

    Ok(Json(MessageResponse::new("Logged out")))
}

/// GET /auth/me, GET /check-auth
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<User>, ApiError> {
    let user = state.auth_service().current_user(&context).await?;
    Ok(Json(user))
}
