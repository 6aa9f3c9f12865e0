use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, AppState, IdResponse, MessageResponse};
use crate::models::reference::EventTitle;

#[derive(Debug, Deserialize)]
pub struct EventTitleRequest {
    pub title: String,
}

/// `GET /api/event-titles`
pub async fn list_event_titles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EventTitle>>, ApiError> {
    Ok(Json(state.reference_service().list_event_titles().await?))
}

/// `POST /api/event-titles` (admin)
pub async fn create_event_title(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EventTitleRequest>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError> {
    let Json(payload) = payload?;
    let id = state
        .reference_service()
        .create_event_title(payload.title)
        .await?;
    Ok(Json(IdResponse { id }))
}

/// `PUT /api/event-titles/{id}` (admin)
pub async fn update_event_title(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<EventTitleRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("event title", id)?;
    let Json(payload) = payload?;
    state
        .reference_service()
        .update_event_title(id, payload.title)
        .await?;
    Ok(Json(MessageResponse::new("Event title updated successfully")))
}

/// `DELETE /api/event-titles/{id}` (admin)
pub async fn delete_event_title(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("event title", id)?;
    state.reference_service().delete_event_title(id).await?;
    Ok(Json(MessageResponse::new("Event title deleted successfully")))
}
