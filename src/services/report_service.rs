//! Domain service for daily shift reports.
//!
//! Every operation receives the acting [`AuthContext`] explicitly; nothing
//! here reads session state on its own.

use thiserror::Error;

use crate::domain::AuthContext;
use crate::models::report::{DailyReport, ReportDraft};

/// Errors specific to report operations.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Report {0} not found")]
    NotFound(i32),

    #[error("Not allowed to modify report {0}")]
    PermissionDenied(i32),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<sea_orm::DbErr> for ReportError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        Self::Persistence(format!("{err:#}"))
    }
}

/// Domain service trait for reports.
#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    /// Lists reports, newest first, optionally limited to one `YYYY-MM-DD` date.
    async fn list(&self, date: Option<&str>) -> Result<Vec<DailyReport>, ReportError>;

    /// Fetches one fully assembled report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::NotFound`] if no report has this id.
    async fn get(&self, id: i32) -> Result<DailyReport, ReportError>;

    /// Creates a report owned by `actor` and returns its id.
    async fn create(&self, draft: ReportDraft, actor: &AuthContext) -> Result<i32, ReportError>;

    /// Replaces every field and child collection of a report.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::PermissionDenied`] unless `actor` owns the
    /// report or is an admin.
    async fn update(
        &self,
        id: i32,
        draft: ReportDraft,
        actor: &AuthContext,
    ) -> Result<(), ReportError>;

    /// Deletes a report and all of its children; same ownership rule as update.
    async fn delete(&self, id: i32, actor: &AuthContext) -> Result<(), ReportError>;
}
