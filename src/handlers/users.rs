use crate::error::ApiError;
use crate::extract::FormOrJson;
use crate::schemas::AppState;
use axum::{extract::State, response::Json};
use common::UserDto;
use model::entities::user;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating a new user
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    /// Display name, need not be unique
    #[validate(
        required(message = "username is required"),
        length(min = 1, message = "username must not be empty")
    )]
    pub username: Option<String>,
}

/// Wire shape of a stored user.
pub(crate) fn user_dto(model: &user::Model) -> UserDto {
    UserDto::new(model.id, model.username.clone())
}

/// Look up the user a path identifier refers to.
///
/// Identifiers not in the exact form the API hands out cannot name a stored
/// user, so they are reported as missing rather than malformed.
pub(crate) async fn find_user<C>(db: &C, raw_id: &str) -> Result<user::Model, ApiError>
where
    C: ConnectionTrait,
{
    let Some(user_id) = parse_user_id(raw_id) else {
        warn!("User identifier '{}' is not a stored id", raw_id);
        return Err(ApiError::user_not_found());
    };

    match user::Entity::find_by_id(user_id).one(db).await {
        Ok(Some(user_model)) => Ok(user_model),
        Ok(None) => {
            warn!("User with ID {} not found", user_id);
            Err(ApiError::user_not_found())
        }
        Err(db_error) => Err(ApiError::Database {
            message: "Error looking up user",
            source: db_error,
        }),
    }
}

/// Ids are opaque: only the canonical decimal rendering of `_id` matches.
fn parse_user_id(raw_id: &str) -> Option<i32> {
    raw_id
        .parse::<i32>()
        .ok()
        .filter(|user_id| user_id.to_string() == raw_id)
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created successfully", body = UserDto),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    FormOrJson(request): FormOrJson<CreateUserRequest>,
) -> Result<Json<UserDto>, ApiError> {
    trace!("Entering create_user function");
    request.validate()?;
    let username = request.username.unwrap_or_default();
    debug!("Creating user with username: {}", username);

    let new_user = user::ActiveModel {
        username: Set(username),
        ..Default::default()
    };

    let user_model = new_user
        .insert(&state.db)
        .await
        .map_err(ApiError::database("Error creating user"))?;

    info!(
        "User created successfully with ID: {}, username: {}",
        user_model.id, user_model.username
    );
    Ok(Json(user_dto(&user_model)))
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users in creation order", body = Vec<UserDto>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserDto>>, ApiError> {
    trace!("Entering get_users function");

    let users = user::Entity::find()
        .order_by_asc(user::Column::Id)
        .all(&state.db)
        .await
        .map_err(ApiError::database("Error fetching users"))?;

    info!("Successfully retrieved {} users", users.len());
    Ok(Json(users.iter().map(user_dto).collect()))
}
