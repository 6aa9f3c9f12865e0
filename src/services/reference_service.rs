//! Domain service for the reference data reports point at: users, shift
//! hours and event titles.

use thiserror::Error;

use crate::db::is_constraint_violation;
use crate::models::reference::{EventTitle, ShiftHours, ShiftHoursDraft, User, UserDraft};

/// Errors specific to reference data operations.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for ReferenceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReferenceError {
    fn from(err: anyhow::Error) -> Self {
        if is_constraint_violation(&err) {
            Self::Conflict(
                "The change conflicts with existing data (duplicate value or record still in use)"
                    .to_string(),
            )
        } else {
            Self::Database(format!("{err:#}"))
        }
    }
}

/// Domain service trait for reference data.
#[async_trait::async_trait]
pub trait ReferenceService: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, ReferenceError>;

    async fn create_user(&self, draft: UserDraft) -> Result<i32, ReferenceError>;

    /// Updates a user; the password is re-hashed only when a non-empty one
    /// is supplied.
    async fn update_user(&self, id: i32, draft: UserDraft) -> Result<(), ReferenceError>;

    async fn delete_user(&self, id: i32) -> Result<(), ReferenceError>;

    async fn list_shift_hours(&self) -> Result<Vec<ShiftHours>, ReferenceError>;

    async fn create_shift_hours(&self, draft: ShiftHoursDraft) -> Result<i32, ReferenceError>;

    async fn update_shift_hours(
        &self,
        id: i32,
        draft: ShiftHoursDraft,
    ) -> Result<(), ReferenceError>;

    async fn delete_shift_hours(&self, id: i32) -> Result<(), ReferenceError>;

    async fn list_event_titles(&self) -> Result<Vec<EventTitle>, ReferenceError>;

    async fn create_event_title(&self, title: String) -> Result<i32, ReferenceError>;

    async fn update_event_title(&self, id: i32, title: String) -> Result<(), ReferenceError>;

    async fn delete_event_title(&self, id: i32) -> Result<(), ReferenceError>;
}
