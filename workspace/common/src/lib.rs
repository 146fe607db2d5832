//! Transport-layer types for the exercise tracker API.
//!
//! These are the exact JSON shapes the HTTP handlers return. Identifiers are
//! serialized as opaque strings under the `_id` key and every date goes
//! through [`format_log_date`].

mod dates;

pub use dates::{format_log_date, parse_date_input, DateParseError, LOG_DATE_FORMAT};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user as returned by the user endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UserDto {
    /// Opaque user identifier
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl UserDto {
    pub fn new(id: i32, username: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            username: username.into(),
        }
    }
}

/// Response of the add-exercise endpoint.
///
/// `_id` is the identifier of the user the exercise was logged for, not of
/// the exercise itself.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ExerciseDto {
    pub username: String,
    pub description: String,
    /// Minutes
    pub duration: i32,
    /// Formatted as `Thu Jun 15 2023`
    pub date: String,
    /// Identifier of the owning user
    #[serde(rename = "_id")]
    pub id: String,
}

impl ExerciseDto {
    pub fn new(user: &UserDto, description: impl Into<String>, duration: i32, date: NaiveDate) -> Self {
        Self {
            username: user.username.clone(),
            description: description.into(),
            duration,
            date: format_log_date(date),
            id: user.id.clone(),
        }
    }
}

/// One entry of an exercise log.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LogEntryDto {
    pub description: String,
    pub duration: i32,
    pub date: String,
}

impl LogEntryDto {
    pub fn new(description: impl Into<String>, duration: i32, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            duration,
            date: format_log_date(date),
        }
    }
}

/// A user's exercise log. `count` is always the length of `log`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ExerciseLogDto {
    pub username: String,
    pub count: usize,
    #[serde(rename = "_id")]
    pub id: String,
    pub log: Vec<LogEntryDto>,
}

impl ExerciseLogDto {
    pub fn new(user: UserDto, log: Vec<LogEntryDto>) -> Self {
        Self {
            username: user.username,
            count: log.len(),
            id: user.id,
            log,
        }
    }
}
