//! The daily report aggregate as clients see it.
//!
//! A [`DailyReport`] is stored across six tables (root row, two link tables,
//! two event tables) and is always read and written as a whole.

use serde::{Deserialize, Serialize};

use super::reference::{EventTitle, ShiftHours, User};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    pub id: i32,
    pub report_date: String,
    pub shift_hours: Option<ShiftHours>,
    pub shift_managers: Vec<User>,
    pub event_titles: Vec<EventTitle>,
    pub health_power_sources: bool,
    pub health_humidity_temp: bool,
    pub health_fire_system: bool,
    pub events_part3: Vec<EventPart3>,
    pub events_part4: Vec<EventPart4>,
    pub created_by: User,
    pub created_at: String,
}

/// Incident entry that carries an RCA reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPart3 {
    pub id: i32,
    pub event_summary: String,
    pub trigger_info: String,
    /// `HH:MM`, or empty when unknown.
    pub start_time: String,
    pub end_time: String,
    pub rca_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPart4 {
    pub id: i32,
    pub event_summary: String,
    pub trigger_info: String,
    pub start_time: String,
    pub end_time: String,
}

/// Everything a client submits to create or replace a report.
///
/// Missing collections and flags decode as empty/false. The creator is never
/// part of the draft; it comes from the caller's session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportDraft {
    pub report_date: String,
    pub shift_hours_id: Option<i32>,
    pub shift_manager_ids: Vec<i32>,
    pub event_title_ids: Vec<i32>,
    pub health_power_sources: bool,
    pub health_humidity_temp: bool,
    pub health_fire_system: bool,
    pub events_part3: Vec<EventPart3Draft>,
    pub events_part4: Vec<EventPart4Draft>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPart3Draft {
    pub event_summary: String,
    pub trigger_info: String,
    pub start_time: String,
    pub end_time: String,
    pub rca_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventPart4Draft {
    pub event_summary: String,
    pub trigger_info: String,
    pub start_time: String,
    pub end_time: String,
}

impl ReportDraft {
    /// Shift manager ids with duplicates removed, first occurrence kept.
    #[must_use]
    pub fn distinct_manager_ids(&self) -> Vec<i32> {
        distinct(&self.shift_manager_ids)
    }

    /// Event title ids with duplicates removed, first occurrence kept.
    #[must_use]
    pub fn distinct_event_title_ids(&self) -> Vec<i32> {
        distinct(&self.event_title_ids)
    }

    /// Iterate over every time value in both event lists.
    pub fn time_values(&self) -> impl Iterator<Item = &str> {
        let part3 = self
            .events_part3
            .iter()
            .flat_map(|e| [e.start_time.as_str(), e.end_time.as_str()]);
        let part4 = self
            .events_part4
            .iter()
            .flat_map(|e| [e.start_time.as_str(), e.end_time.as_str()]);
        part3.chain(part4)
    }
}

fn distinct(ids: &[i32]) -> Vec<i32> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
