use crate::handlers::{
    greeting::greeting,
    health::health_check,
    lockers::{
        create_locker, delete_locker, get_locker, get_lockers, get_user_locker,
        get_user_locker_by_username, update_locker,
    },
    users::{
        create_user, delete_user, get_user_by_email, get_user_by_rm, get_user_by_username,
        get_users, update_user,
    },
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root greeting
        .route("/", get(greeting))
        // Health check
        .route("/health", get(health_check))
        // User CRUD routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/by-username/:username", get(get_user_by_username))
        .route("/api/v1/users/by-email/:email", get(get_user_by_email))
        .route("/api/v1/users/:rm", get(get_user_by_rm))
        .route("/api/v1/users/:rm", put(update_user))
        .route("/api/v1/users/:rm", delete(delete_user))
        // Locker CRUD routes
        .route("/api/v1/lockers", post(create_locker))
        .route("/api/v1/lockers", get(get_lockers))
        .route("/api/v1/lockers/:number", get(get_locker))
        .route("/api/v1/lockers/:number", put(update_locker))
        .route("/api/v1/lockers/:number", delete(delete_locker))
        // Locker lookups through the holding user
        .route("/api/v1/users/:rm/locker", get(get_user_locker))
        .route(
            "/api/v1/users/by-username/:username/locker",
            get(get_user_locker_by_username),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
