//! Lenient date parsing for catalog date columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only layouts tried in order
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y", "%d %B %Y"];

/// Date-time layouts tried in order; only the date part is kept
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a date cell, returning `None` for anything unrecognised.
///
/// Unparseable input is never an error: callers store a missing marker.
///
/// # Examples
///
/// ```
/// use catalog_etl::parsing::dates::parse_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_date(" September 9, 2019"), NaiveDate::from_ymd_opt(2019, 9, 9));
/// assert_eq!(parse_date("2021-09-24"), NaiveDate::from_ymd_opt(2021, 9, 24));
/// assert_eq!(parse_date("someday"), None);
/// ```
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Render a date the way cleaned tables store it.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
