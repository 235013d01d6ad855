use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Accepts `HH:MM` and `HH:MM:SS`.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

pub fn format_timestamp(value: Option<NaiveDateTime>) -> Option<String> {
    value.map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
}
