pub mod event_title;
pub mod report;
pub mod shift_hours;
pub mod user;
