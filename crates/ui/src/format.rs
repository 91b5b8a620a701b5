use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// `d/m/yyyy` (en-IN short form). Accepts RFC 3339, ISO date-times without
/// offset and plain dates; anything else is shown as received.
/// Offset timestamps keep their own calendar date.
pub fn format_date(raw: &str) -> String {
    let s = raw.trim();
    let date = DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"));
    match date {
        Ok(d) => d.format("%-d/%-m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

pub fn format_opt_date(raw: Option<&str>) -> String {
    raw.map(format_date).unwrap_or_else(|| "-".to_string())
}
