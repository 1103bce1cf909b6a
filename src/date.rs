use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};

/// Format of the `due_date` string carried on the wire: date and wall-clock
/// time joined by a literal `T`, no seconds, no zone.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

/// Renders a millisecond timestamp (as produced by a date picker) as a
/// `YYYY-MM-DD` date string. Out-of-range timestamps collapse to the epoch
/// date.
pub fn date_string_from_millis(millis: i64) -> String {
    let date = DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.date_naive())
        .unwrap_or_default();
    date.format(DATE_FORMAT).to_string()
}

/// Renders an hour/minute pair as `HH:MM`, falling back to `00:00` when no
/// time was picked or the pair is out of range.
pub fn time_string(time: Option<(u32, u32)>) -> String {
    match time.and_then(|(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0)) {
        Some(t) => t.format(TIME_FORMAT).to_string(),
        None => "00:00".to_string(),
    }
}

/// Composes the wire-format due-date string from picker inputs.
pub fn due_date_string(date_millis: i64, time: Option<(u32, u32)>) -> String {
    format!(
        "{}T{}",
        date_string_from_millis(date_millis),
        time_string(time)
    )
}

/// Parses a wire-format due-date string back into a naive timestamp.
pub fn parse_due_date(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DUE_DATE_FORMAT).ok()
}
