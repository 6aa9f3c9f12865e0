//! Daily report endpoints.
//!
//! Handlers only decode requests and hand the caller's [`AuthContext`] to
//! the [`ReportService`](crate::services::ReportService); ownership checks
//! and persistence happen there.

use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::{JsonRejection, PathRejection}},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::{date_filter, validate_id};
use super::{ApiError, AppState, IdResponse, MessageResponse};
use crate::domain::AuthContext;
use crate::models::report::{DailyReport, ReportDraft};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub date: Option<String>,
}

/// `GET /api/reports?date=YYYY-MM-DD`
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<DailyReport>>, ApiError> {
    let reports = state
        .report_service()
        .list(date_filter(query.date.as_deref()))
        .await?;
    Ok(Json(reports))
}

/// `GET /api/reports/{id}`
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<DailyReport>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("report", id)?;
    let report = state.report_service().get(id).await?;
    Ok(Json(report))
}

/// `POST /api/reports`
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthContext>,
    payload: Result<Json<ReportDraft>, JsonRejection>,
) -> Result<Json<IdResponse>, ApiError> {
    let Json(draft) = payload?;
    let id = state.report_service().create(draft, &actor).await?;
    Ok(Json(IdResponse { id }))
}

/// `PUT /api/reports/{id}`
///
/// Full replace: collections missing from the body end up empty.
pub async fn update_report(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthContext>,
    path: Result<Path<i32>, PathRejection>,
    payload: Result<Json<ReportDraft>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("report", id)?;
    let Json(draft) = payload?;
    state.report_service().update(id, draft, &actor).await?;
    Ok(Json(MessageResponse::new("Report updated successfully")))
}

/// `DELETE /api/reports/{id}`
pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<AuthContext>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = path?;
    let id = validate_id("report", id)?;
    state.report_service().delete(id, &actor).await?;
    Ok(Json(MessageResponse::new("Report deleted successfully")))
}
