//! `SeaORM` implementation of the `ReferenceService` trait.

use async_trait::async_trait;
use tracing::info;

use crate::config::SecurityConfig;
use crate::db::Store;
use crate::models::reference::{EventTitle, ShiftHours, ShiftHoursDraft, User, UserDraft};
use crate::parser::clock;
use crate::services::reference_service::{ReferenceError, ReferenceService};

pub struct SeaOrmReferenceService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmReferenceService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn validate_user(
        security: &SecurityConfig,
        draft: &UserDraft,
        password_required: bool,
    ) -> Result<(), ReferenceError> {
        require("username", &draft.username)?;
        require("full_name", &draft.full_name)?;
        require("role", &draft.role)?;

        match draft.password.as_deref() {
            None | Some("") if password_required => Err(ReferenceError::Validation(
                "password is required".to_string(),
            )),
            Some(password)
                if !password.is_empty()
                    && password.chars().count() < security.min_password_length =>
            {
                Err(ReferenceError::Validation(format!(
                    "password must be at least {} characters",
                    security.min_password_length
                )))
            }
            _ => Ok(()),
        }
    }

    fn validate_shift_hours(draft: &ShiftHoursDraft) -> Result<(), ReferenceError> {
        require("name", &draft.name)?;
        for (field, value) in [("start_time", &draft.start_time), ("end_time", &draft.end_time)] {
            require(field, value)?;
            if !clock::is_accepted(value) {
                return Err(ReferenceError::Validation(format!(
                    "{field} must be HH:MM, got '{value}'"
                )));
            }
        }
        Ok(())
    }
}

fn require(field: &str, value: &str) -> Result<(), ReferenceError> {
    if value.trim().is_empty() {
        return Err(ReferenceError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn found(exists: bool, what: impl FnOnce() -> String) -> Result<(), ReferenceError> {
    if exists {
        Ok(())
    } else {
        Err(ReferenceError::NotFound(what()))
    }
}

#[async_trait]
impl ReferenceService for SeaOrmReferenceService {
    async fn list_users(&self) -> Result<Vec<User>, ReferenceError> {
        Ok(self.store.list_users().await?)
    }

    async fn create_user(&self, draft: UserDraft) -> Result<i32, ReferenceError> {
        Self::validate_user(&self.security, &draft, true)?;
        let username = draft.username.clone();
        let id = self.store.create_user(draft, &self.security).await?;
        info!(user_id = id, username = %username, "User created");
        Ok(id)
    }

    async fn update_user(&self, id: i32, draft: UserDraft) -> Result<(), ReferenceError> {
        Self::validate_user(&self.security, &draft, false)?;
        let updated = self.store.update_user(id, draft, &self.security).await?;
        found(updated, || format!("User {id}"))
    }

    async fn delete_user(&self, id: i32) -> Result<(), ReferenceError> {
        let deleted = self.store.delete_user(id).await?;
        found(deleted, || format!("User {id}"))?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn list_shift_hours(&self) -> Result<Vec<ShiftHours>, ReferenceError> {
        Ok(self.store.list_shift_hours().await?)
    }

    async fn create_shift_hours(&self, draft: ShiftHoursDraft) -> Result<i32, ReferenceError> {
        Self::validate_shift_hours(&draft)?;
        Ok(self.store.create_shift_hours(draft).await?)
    }

    async fn update_shift_hours(
        &self,
        id: i32,
        draft: ShiftHoursDraft,
    ) -> Result<(), ReferenceError> {
        Self::validate_shift_hours(&draft)?;
        let updated = self.store.update_shift_hours(id, draft).await?;
        found(updated, || format!("Shift hours {id}"))
    }

    async fn delete_shift_hours(&self, id: i32) -> Result<(), ReferenceError> {
        let deleted = self.store.delete_shift_hours(id).await?;
        found(deleted, || format!("Shift hours {id}"))
    }

    async fn list_event_titles(&self) -> Result<Vec<EventTitle>, ReferenceError> {
        Ok(self.store.list_event_titles().await?)
    }

    async fn create_event_title(&self, title: String) -> Result<i32, ReferenceError> {
        require("title", &title)?;
        Ok(self.store.create_event_title(title).await?)
    }

    async fn update_event_title(&self, id: i32, title: String) -> Result<(), ReferenceError> {
        require("title", &title)?;
        let updated = self.store.update_event_title(id, title).await?;
        found(updated, || format!("Event title {id}"))
    }

    async fn delete_event_title(&self, id: i32) -> Result<(), ReferenceError> {
        let deleted = self.store.delete_event_title(id).await?;
        found(deleted, || format!("Event title {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(password: Option<&str>) -> UserDraft {
        UserDraft {
            username: "jdoe".to_string(),
            full_name: "J. Doe".to_string(),
            role: "operator".to_string(),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_require() {
        assert!(require("title", "Outage").is_ok());
        assert!(matches!(
            require("title", "   "),
            Err(ReferenceError::Validation(msg)) if msg.contains("title")
        ));
    }

    #[test]
    fn test_shift_hours_validation() {
        let ok = ShiftHoursDraft {
            name: "Night".to_string(),
            start_time: "22:00".to_string(),
            end_time: "06:00".to_string(),
        };
        assert!(SeaOrmReferenceService::validate_shift_hours(&ok).is_ok());

        let bad = ShiftHoursDraft {
            end_time: "late".to_string(),
            ..ok
        };
        assert!(SeaOrmReferenceService::validate_shift_hours(&bad).is_err());
    }

    #[test]
    fn test_user_password_rules() {
        let security = SecurityConfig::default();
        let check = |draft: UserDraft, required: bool| {
            SeaOrmReferenceService::validate_user(&security, &draft, required)
        };

        assert!(check(user(Some("longenough")), true).is_ok());
        assert!(check(user(None), true).is_err());
        assert!(check(user(Some("short")), true).is_err());

        assert!(check(user(None), false).is_ok());
        assert!(check(user(Some("")), false).is_ok());
        assert!(check(user(Some("short")), false).is_err());
    }
}
