pub mod prelude;

pub mod daily_reports;
pub mod event_titles;
pub mod report_event_titles;
pub mod report_events_part3;
pub mod report_events_part4;
pub mod report_shift_managers;
pub mod shift_hours;
pub mod users;
