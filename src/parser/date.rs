//! Calendar dates carried by reports.

use chrono::NaiveDate;

const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether `value` is a valid `YYYY-MM-DD` calendar date.
#[must_use]
pub fn is_report_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, REPORT_DATE_FORMAT).is_ok()
}
