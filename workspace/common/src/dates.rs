//! Calendar date handling for the wire format.
//!
//! Every date leaving the API is rendered with [`LOG_DATE_FORMAT`], e.g.
//! `Thu Jun 15 2023`. The format is fixed and locale independent, so clients
//! can compare it byte for byte.
//!
//! Incoming dates are more forgiving: [`parse_date_input`] accepts the plain
//! `YYYY-MM-DD` form HTML date pickers send, full RFC 3339 timestamps, naive
//! `YYYY-MM-DDTHH:MM:SS` timestamps and the log format itself.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Weekday, month, zero padded day, year.
pub const LOG_DATE_FORMAT: &str = "%a %b %d %Y";

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("date must not be empty")]
    Empty,
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),
}

/// Render a date the way every API response shows it.
pub fn format_log_date(date: NaiveDate) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}

/// Parse a caller supplied date.
///
/// Timestamps carrying an offset are converted to UTC before the calendar day
/// is taken; naive timestamps keep their own day.
pub fn parse_date_input(raw: &str) -> Result<NaiveDate, DateParseError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.with_timezone(&Utc).date_naive());
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(timestamp.date());
        }
    }

    NaiveDate::parse_from_str(input, LOG_DATE_FORMAT)
        .map_err(|_| DateParseError::Invalid(input.to_string()))
}
