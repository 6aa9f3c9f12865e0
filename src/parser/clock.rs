//! Time-of-day values for report events.
//!
//! Clients exchange `HH:MM`. Storage keeps a full `YYYY-MM-DD HH:MM:SS`
//! timestamp pinned to [`ANCHOR_DATE`]; only the hour and minute carry
//! meaning. No timezone handling happens here.

use chrono::{DateTime, NaiveDateTime};

/// Date every time-of-day value is pinned to in storage.
pub const ANCHOR_DATE: &str = "1970-01-01";

/// Timestamp shapes accepted as already-stored values. `%.f` also matches
/// no fractional part.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Values this short are treated as `HH:MM`.
const SHORT_FORM_MAX_LEN: usize = 5;

/// Shortest value that can hold `YYYY-MM-DD HH:MM:SS`.
const FULL_TIMESTAMP_MIN_LEN: usize = 19;

/// Expand a short `HH:MM` value into the anchored storage form.
///
/// Empty values and anything longer than `HH:MM` (an already stored
/// timestamp) are returned unchanged, so the conversion is idempotent.
#[must_use]
pub fn to_storage(value: &str) -> String {
    if value.is_empty() || value.len() > SHORT_FORM_MAX_LEN {
        return value.to_string();
    }

    let clock = canonical_clock(value).unwrap_or_else(|| value.to_string());
    format!("{ANCHOR_DATE} {clock}:00")
}

/// Extract `HH:MM` from a stored timestamp.
///
/// Values shorter than a full timestamp are passed through.
#[must_use]
pub fn to_display(stored: &str) -> String {
    if stored.len() < FULL_TIMESTAMP_MIN_LEN {
        return stored.to_string();
    }

    stored.get(11..16).unwrap_or(stored).to_string()
}

/// Storage form for an optional column: empty input becomes NULL.
#[must_use]
pub fn storage_column(value: &str) -> Option<String> {
    let stored = to_storage(value);
    (!stored.is_empty()).then_some(stored)
}

/// Display form of an optional column: NULL reads back as an empty string.
#[must_use]
pub fn display_column(stored: Option<&str>) -> String {
    stored.map(to_display).unwrap_or_default()
}

/// Whether a client-supplied value is acceptable: empty, `HH:MM`, or a full
/// timestamp (space or `T` separated, optional fraction, optional offset).
/// Full timestamps are stored unchanged.
#[must_use]
pub fn is_accepted(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    if value.len() <= SHORT_FORM_MAX_LEN {
        return canonical_clock(value).is_some();
    }

    value.len() >= FULL_TIMESTAMP_MIN_LEN && is_full_timestamp(value)
}

fn is_full_timestamp(value: &str) -> bool {
    TIMESTAMP_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(value, format).is_ok())
        || DateTime::parse_from_rfc3339(value).is_ok()
}

/// Zero-pad `H:MM` / `HH:M` style input into `HH:MM`.
fn canonical_clock(value: &str) -> Option<String> {
    let (hours, minutes) = value.split_once(':')?;
    if hours.is_empty()
        || minutes.is_empty()
        || !hours.bytes().all(|b| b.is_ascii_digit())
        || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    (hours < 24 && minutes < 60).then(|| format!("{hours:02}:{minutes:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_storage() {
        assert_eq!(to_storage("08:30"), "1970-01-01 08:30:00");
        assert_eq!(to_storage("8:30"), "1970-01-01 08:30:00");
        assert_eq!(to_storage(""), "");
        assert_eq!(to_storage("2024-05-01 23:15:00"), "2024-05-01 23:15:00");
    }

    #[test]
    fn test_to_display() {
        assert_eq!(to_display("1970-01-01 08:30:00"), "08:30");
        assert_eq!(to_display("2024-05-01T23:15:00Z"), "23:15");
        assert_eq!(to_display("08:30"), "08:30");
        assert_eq!(to_display(""), "");
    }

    #[test]
    fn test_round_trip_is_stable() {
        for value in ["00:00", "08:30", "23:59"] {
            assert_eq!(to_display(&to_storage(value)), value);
            assert_eq!(to_storage(&to_storage(value)), to_storage(value));
        }
    }

    #[test]
    fn test_optional_columns() {
        assert_eq!(storage_column(""), None);
        assert_eq!(
            storage_column("07:05").as_deref(),
            Some("1970-01-01 07:05:00")
        );
        assert_eq!(display_column(None), "");
        assert_eq!(display_column(Some("1970-01-01 07:05:00")), "07:05");
    }

    #[test]
    fn test_is_accepted() {
        assert!(is_accepted(""));
        assert!(is_accepted("08:30"));
        assert!(is_accepted("8:30"));
        assert!(is_accepted("1970-01-01 08:30:00"));
        assert!(is_accepted("1970-01-01 08:30:00.000"));
        assert!(is_accepted("2025-03-01T08:30:00"));
        assert!(is_accepted("2024-05-01T23:15:00Z"));
        assert!(is_accepted("2024-05-01T23:15:00.5+02:00"));
        assert!(!is_accepted("24:00"));
        assert!(!is_accepted("8h30"));
        assert!(!is_accepted("noon"));
        assert!(!is_accepted("1970-01-01T08:30"));
        assert!(!is_accepted("2025-13-01 08:30:00"));
        assert!(!is_accepted("yesterday at eight"));
    }
}
