use crate::error::ApiError;
use crate::extract::{ApiPath, ApiQuery, FormOrJson};
use crate::handlers::users::{find_user, user_dto};
use crate::query::{LogFilter, LogQuery};
use crate::schemas::AppState;
use axum::{
    extract::State,
    response::Json,
};
use chrono::{NaiveDate, Utc};
use common::{parse_date_input, ExerciseDto, ExerciseLogDto, LogEntryDto};
use model::entities::exercise;
use sea_orm::{ActiveModelTrait, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;
use validator::Validate;

/// Exercise duration as sent by the client: a JSON number or the text of a
/// form field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum DurationInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DurationInput {
    /// Coerce to whole minutes. Fractions are truncated; anything that is not
    /// a positive number is rejected.
    pub fn minutes(&self) -> Result<i32, ApiError> {
        let value = match self {
            DurationInput::Integer(value) => Some(*value),
            DurationInput::Float(value) => truncate(*value),
            DurationInput::Text(text) => {
                let text = text.trim();
                text.parse::<i64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(truncate))
            }
        };

        value
            .filter(|minutes| *minutes > 0)
            .and_then(|minutes| i32::try_from(minutes).ok())
            .ok_or_else(|| ApiError::bad_request("duration must be a positive number of minutes"))
    }
}

fn truncate(value: f64) -> Option<i64> {
    if value.is_finite() && value.abs() < i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

/// Request body for logging an exercise
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateExerciseRequest {
    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description must not be empty")
    )]
    pub description: Option<String>,
    /// Minutes, as a number or numeric string
    #[validate(required(message = "duration is required"))]
    pub duration: Option<DurationInput>,
    /// Day of the exercise (YYYY-MM-DD); today when omitted
    pub date: Option<String>,
}

/// A validated exercise ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    pub description: String,
    pub duration: i32,
    pub date: NaiveDate,
}

impl CreateExerciseRequest {
    /// Validate the body and coerce its fields. `today` is used when no date
    /// was supplied.
    pub fn into_new_exercise(self, today: NaiveDate) -> Result<NewExercise, ApiError> {
        self.validate()?;

        let duration = match &self.duration {
            Some(duration) => duration.minutes()?,
            None => return Err(ApiError::bad_request("duration is required")),
        };

        let date = match self.date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(raw) => parse_date_input(raw)?,
        };

        Ok(NewExercise {
            description: self.description.unwrap_or_default(),
            duration,
            date,
        })
    }
}

/// Log an exercise for a user
#[utoipa::path(
    post,
    path = "/api/users/{_id}/exercises",
    tag = "exercises",
    params(
        ("_id" = String, Path, description = "User identifier"),
    ),
    request_body = CreateExerciseRequest,
    responses(
        (status = 200, description = "Exercise logged; `_id` is the user's identifier", body = ExerciseDto),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn add_exercise(
    ApiPath(user_id): ApiPath<String>,
    State(state): State<AppState>,
    FormOrJson(request): FormOrJson<CreateExerciseRequest>,
) -> Result<Json<ExerciseDto>, ApiError> {
    trace!("Entering add_exercise function for user_id: {}", user_id);
    let new_exercise = request.into_new_exercise(Utc::now().date_naive())?;
    debug!(
        "Logging exercise '{}' ({} min on {}) for user {}",
        new_exercise.description, new_exercise.duration, new_exercise.date, user_id
    );

    // The owner check and the insert commit together
    let txn = state
        .db
        .begin()
        .await
        .map_err(ApiError::database("Error adding exercise"))?;

    let user_model = find_user(&txn, &user_id).await?;

    let saved = exercise::ActiveModel {
        user_id: Set(user_model.id),
        description: Set(new_exercise.description),
        duration: Set(new_exercise.duration),
        date: Set(new_exercise.date),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(ApiError::database("Error adding exercise"))?;

    txn.commit()
        .await
        .map_err(ApiError::database("Error adding exercise"))?;

    info!(
        "Exercise {} logged for user {} ({})",
        saved.id, user_model.id, user_model.username
    );
    let owner = user_dto(&user_model);
    Ok(Json(ExerciseDto::new(
        &owner,
        saved.description,
        saved.duration,
        saved.date,
    )))
}

/// Get a user's exercise log
#[utoipa::path(
    get,
    path = "/api/users/{_id}/logs",
    tag = "exercises",
    params(
        ("_id" = String, Path, description = "User identifier"),
        LogQuery
    ),
    responses(
        (status = 200, description = "Exercise log, oldest first", body = ExerciseLogDto),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_exercise_log(
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<LogQuery>,
    State(state): State<AppState>,
) -> Result<Json<ExerciseLogDto>, ApiError> {
    trace!("Entering get_exercise_log function for user_id: {}", user_id);

    let user_model = find_user(&state.db, &user_id).await?;
    let filter = LogFilter::from_query(user_model.id, &query)?;
    debug!("Fetching exercise log with filter: {:?}", filter);

    let exercises = filter
        .select()
        .all(&state.db)
        .await
        .map_err(ApiError::database("Error fetching logs"))?;

    let log: Vec<LogEntryDto> = exercises
        .into_iter()
        .map(|exercise| LogEntryDto::new(exercise.description, exercise.duration, exercise.date))
        .collect();

    info!(
        "Returning {} log entries for user {}",
        log.len(),
        user_model.id
    );
    Ok(Json(ExerciseLogDto::new(user_dto(&user_model), log)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn request(description: Option<&str>, duration: Option<DurationInput>, date: Option<&str>) -> CreateExerciseRequest {
        CreateExerciseRequest {
            description: description.map(str::to_string),
            duration,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_duration_coercion() {
        assert_eq!(DurationInput::Integer(30).minutes().unwrap(), 30);
        assert_eq!(DurationInput::Text("45".to_string()).minutes().unwrap(), 45);
        assert_eq!(DurationInput::Text(" 20 ".to_string()).minutes().unwrap(), 20);
        assert_eq!(DurationInput::Float(12.9).minutes().unwrap(), 12);
        assert_eq!(DurationInput::Text("12.5".to_string()).minutes().unwrap(), 12);
    }

    #[test]
    fn test_duration_rejects_non_positive_and_text() {
        assert!(DurationInput::Integer(0).minutes().is_err());
        assert!(DurationInput::Integer(-5).minutes().is_err());
        assert!(DurationInput::Text("half an hour".to_string()).minutes().is_err());
        assert!(DurationInput::Text(String::new()).minutes().is_err());
        assert!(DurationInput::Integer(i64::from(i32::MAX) + 1).minutes().is_err());
        assert!(DurationInput::Float(f64::NAN).minutes().is_err());
    }

    #[test]
    fn test_duration_deserializes_from_json_and_form() {
        let from_json: CreateExerciseRequest =
            serde_json::from_str(r#"{"description":"run","duration":30}"#).unwrap();
        assert_eq!(from_json.duration, Some(DurationInput::Integer(30)));

        let from_text: CreateExerciseRequest =
            serde_json::from_str(r#"{"description":"run","duration":"30"}"#).unwrap();
        assert_eq!(from_text.duration, Some(DurationInput::Text("30".to_string())));
    }

    #[test]
    fn test_date_defaults_to_today() {
        let exercise = request(Some("run"), Some(DurationInput::Integer(30)), None)
            .into_new_exercise(today())
            .unwrap();
        assert_eq!(exercise.date, today());

        let blank = request(Some("run"), Some(DurationInput::Integer(30)), Some(""))
            .into_new_exercise(today())
            .unwrap();
        assert_eq!(blank.date, today());
    }

    #[test]
    fn test_supplied_date_is_parsed() {
        let exercise = request(Some("swim"), Some(DurationInput::Integer(15)), Some("2023-06-15"))
            .into_new_exercise(today())
            .unwrap();
        assert_eq!(
            exercise,
            NewExercise {
                description: "swim".to_string(),
                duration: 15,
                date: NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
            }
        );
    }

    #[test]
    fn test_invalid_bodies_are_rejected() {
        assert!(request(None, Some(DurationInput::Integer(30)), None)
            .into_new_exercise(today())
            .is_err());
        assert!(request(Some(""), Some(DurationInput::Integer(30)), None)
            .into_new_exercise(today())
            .is_err());
        assert!(request(Some("run"), None, None)
            .into_new_exercise(today())
            .is_err());
        assert!(request(Some("run"), Some(DurationInput::Integer(30)), Some("someday"))
            .into_new_exercise(today())
            .is_err());
    }
}
