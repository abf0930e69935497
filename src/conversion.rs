//! Formatting helpers shared by the report and CSV exports
//!
//! Durations are rendered as zero-padded day/hour/minute fields
//! (`DDd HHh MMm`), timestamps at minute or second resolution.

use chrono::{Duration, NaiveDateTime};

pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a number of minutes as `DDd HHh MMm`
pub fn format_duration_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!(
        "{:02}d {:02}h {:02}m",
        minutes / 1440,
        (minutes % 1440) / 60,
        minutes % 60
    )
}

/// Format a number of minutes as `HHh MMm`, for values under a day
///
/// Longer values keep counting hours rather than wrapping.
pub fn format_duration_hours(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}h {:02}m", minutes / 60, minutes % 60)
}

/// Format a chrono duration as `DDd HHh MMm`, dropping seconds
pub fn format_duration(duration: Duration) -> String {
    format_duration_minutes(duration.num_minutes())
}

pub fn format_csv_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(CSV_TIMESTAMP_FORMAT).to_string()
}

pub fn format_report_timestamp(timestamp: &NaiveDateTime) -> String {
    timestamp.format(REPORT_TIMESTAMP_FORMAT).to_string()
}

/// Parse a user supplied `YYYY-MM-DD HH:MM` timestamp (seconds optional)
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, CSV_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, REPORT_TIMESTAMP_FORMAT))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
        .ok()
}
