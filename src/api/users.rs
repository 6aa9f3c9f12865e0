use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, AppState, IdResponse, MessageResponse};
use crate::models::reference::{User, UserDraft};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub password: Option<String>,
}

/// `GET /api/users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<User>>, ApiError> {
    Ok(Json(state.reference_service().list_users().await?))
}

/// `POST /api/users` (admin)
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError> {
    let Json(payload) = payload?;
    let id = state
        .reference_service()
        .create_user(UserDraft {
            username: payload.username,
            full_name: payload.full_name,
            role: payload.role,
            password: Some(payload.password),
        })
        .await?;
    Ok(Json(IdResponse { id }))
}

/// `PUT /api/users/{id}` (admin)
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("user", id)?;
    let Json(payload) = payload?;
    state
        .reference_service()
        .update_user(
            id,
            UserDraft {
                username: payload.username,
                full_name: payload.full_name,
                role: payload.role,
                password: payload.password,
            },
        )
        .await?;
    Ok(Json(MessageResponse::new("User updated successfully")))
}

/// `DELETE /api/users/{id}` (admin)
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("user", id)?;
    state.reference_service().delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
