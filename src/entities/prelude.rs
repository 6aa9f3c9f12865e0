pub use super::daily_reports::Entity as DailyReports;
pub use super::event_titles::Entity as EventTitles;
pub use super::report_event_titles::Entity as ReportEventTitles;
pub use super::report_events_part3::Entity as ReportEventsPart3;
pub use super::report_events_part4::Entity as ReportEventsPart4;
pub use super::report_shift_managers::Entity as ReportShiftManagers;
pub use super::shift_hours::Entity as ShiftHours;
pub use super::users::Entity as Users;
