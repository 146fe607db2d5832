use crate::config::AppConfig;
use crate::handlers::exercises::{CreateExerciseRequest, DurationInput};
use crate::handlers::users::CreateUserRequest;
use crate::query::LogQuery;
use common::{ExerciseDto, ExerciseLogDto, LogEntryDto, UserDto};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool, created once at startup
    pub db: DatabaseConnection,
    /// Settings the router needs at request time
    pub config: Arc<AppConfig>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::exercises::add_exercise,
        crate::handlers::exercises::get_exercise_log,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            CreateUserRequest,
            CreateExerciseRequest,
            DurationInput,
            LogQuery,
            UserDto,
            ExerciseDto,
            LogEntryDto,
            ExerciseLogDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User endpoints"),
        (name = "exercises", description = "Exercise logging and log retrieval"),
    ),
    info(
        title = "Exercise Tracker API",
        description = "Create users, log exercises against them and read back filtered exercise logs",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
