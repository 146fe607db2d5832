use crate::schemas::ErrorResponse;
use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use common::DateParseError;
use sea_orm::DbErr;
use thiserror::Error;
use tracing::{debug, error};
use validator::ValidationErrors;

/// Errors a handler can answer with.
///
/// Every variant renders as `{ "error": "..." }`. Storage failures keep the
/// underlying [`DbErr`] for the logs but only expose their fixed message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}: {source}")]
    Database {
        message: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("Request timed out")]
    Timeout,

    #[error("middleware failure: {0}")]
    Middleware(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn user_not_found() -> Self {
        ApiError::NotFound("User not found".to_string())
    }

    /// Adapter for `map_err` that tags a storage error with the message the
    /// client will see.
    pub fn database(message: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| ApiError::Database { message, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Database { .. } | ApiError::Middleware(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::BadRequest(message) | ApiError::NotFound(message) => message.clone(),
            ApiError::Database { message, .. } => (*message).to_string(),
            ApiError::Timeout => "Request timed out".to_string(),
            ApiError::Middleware(_) => "Internal server error".to_string(),
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(source: DbErr) -> Self {
        ApiError::Database {
            message: "Internal server error",
            source,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        debug!("Rejected query string: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        debug!("Rejected path parameters: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<DateParseError> for ApiError {
    fn from(err: DateParseError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |field_error| match &field_error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        // HashMap order is arbitrary
        messages.sort();
        messages.dedup();
        ApiError::BadRequest(messages.join(", "))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database { message, source } => error!("{}: {}", message, source),
            ApiError::Middleware(cause) => error!("Unhandled middleware error: {}", cause),
            _ => {}
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Turns errors raised by fallible tower middleware into API errors.
pub async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Middleware(err.to_string())
    }
}
