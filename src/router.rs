use crate::handlers::{
    exercises::{add_exercise, get_exercise_log},
    health::health_check,
    home::index,
    users::{create_user, get_users},
};
use crate::error::handle_middleware_error;
use crate::schemas::{ApiDoc, AppState};
use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post},
    Router,
};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);
    let request_timeout = state.config.request_timeout();

    Router::new()
        // Landing page and health check
        .route("/", get(index))
        .route("/health", get(health_check))
        // Users
        .route("/api/users", post(create_user).get(get_users))
        // Exercises and logs, keyed by the owning user
        .route("/api/users/:_id/exercises", post(add_exercise))
        .route("/api/users/:_id/logs", get(get_exercise_log))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Stylesheets and other assets referenced by the landing page
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                // Timeouts answer with the same JSON error body as handlers
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
