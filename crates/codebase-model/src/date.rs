//! Date parsing shared by the dataset reader and date-based queries.

use chrono::NaiveDate;

/// Formats accepted for code dates, most common first.
const DATE_FORMATS: [&str; 3] = [
    "%Y%m%d",   // Compact: 20160101 (reference file and query form)
    "%Y-%m-%d", // ISO 8601
    "%Y/%m/%d",
];

/// Parse a code or query date. Returns `None` for blank or unparseable text.
///
/// ```
/// use codebase_model::parse_date;
///
/// assert_eq!(parse_date("20030101"), parse_date("2003-01-01"));
/// assert!(parse_date("2003-02-30").is_none());
/// assert!(parse_date("").is_none());
/// ```
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}
