use serde::{Deserialize, Serialize};

use crate::entities::{event_titles, shift_hours, users};

/// Public view of a user. The password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub role: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            full_name: model.full_name,
            role: model.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftHours {
    pub id: i32,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}

impl From<shift_hours::Model> for ShiftHours {
    fn from(model: shift_hours::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            start_time: model.start_time,
            end_time: model.end_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTitle {
    pub id: i32,
    pub title: String,
}

impl From<event_titles::Model> for EventTitle {
    fn from(model: event_titles::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
        }
    }
}

/// Fields accepted when creating or updating a user.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub username: String,
    pub full_name: String,
    pub role: String,
    /// Plain-text password; `None` keeps the stored hash on update.
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShiftHoursDraft {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
}
