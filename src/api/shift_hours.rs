use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::validate_id;
use super::{ApiError, AppState, IdResponse, MessageResponse};
use crate::models::reference::{ShiftHours, ShiftHoursDraft};

#[derive(Debug, Deserialize)]
pub struct ShiftHoursRequest {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<ShiftHoursRequest> for ShiftHoursDraft {
    fn from(request: ShiftHoursRequest) -> Self {
        Self {
            name: request.name,
            start_time: request.start_time,
            end_time: request.end_time,
        }
    }
}

/// `GET /api/shift-hours`
pub async fn list_shift_hours(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShiftHours>>, ApiError> {
    Ok(Json(state.reference_service().list_shift_hours().await?))
}

/// `POST /api/shift-hours` (admin)
pub async fn create_shift_hours(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ShiftHoursRequest>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError> {
    let Json(payload) = payload?;
    let id = state
        .reference_service()
        .create_shift_hours(payload.into())
        .await?;
    Ok(Json(IdResponse { id }))
}

/// `PUT /api/shift-hours/{id}` (admin)
pub async fn update_shift_hours(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ShiftHoursRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("shift hours", id)?;
    let Json(payload) = payload?;
    state
        .reference_service()
        .update_shift_hours(id, payload.into())
        .await?;
    Ok(Json(MessageResponse::new("Shift hours updated successfully")))
}

/// `DELETE /api/shift-hours/{id}` (admin)
pub async fn delete_shift_hours(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("shift hours", id)?;
    state.reference_service().delete_shift_hours(id).await?;
    Ok(Json(MessageResponse::new("Shift hours deleted successfully")))
}
