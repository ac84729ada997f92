use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::lockers::{CreateLockerRequest, LockerResponse, UpdateLockerRequest};
use crate::handlers::users::{CreateUserRequest, UpdateUserRequest, UserResponse};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Fixed greeting payload served at the root route
#[derive(Serialize, ToSchema)]
pub struct GreetingResponse {
    /// Greeting message
    pub message: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::greeting::greeting,
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user_by_rm,
        crate::handlers::users::get_user_by_username,
        crate::handlers::users::get_user_by_email,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::lockers::create_locker,
        crate::handlers::lockers::get_lockers,
        crate::handlers::lockers::get_locker,
        crate::handlers::lockers::update_locker,
        crate::handlers::lockers::delete_locker,
        crate::handlers::lockers::get_user_locker,
        crate::handlers::lockers::get_user_locker_by_username,
    ),
    components(
        schemas(
            ApiResponse<UserResponse>,
            ApiResponse<Vec<UserResponse>>,
            ApiResponse<LockerResponse>,
            ApiResponse<Vec<LockerResponse>>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            GreetingResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            CreateLockerRequest,
            UpdateLockerRequest,
            LockerResponse,
        )
    ),
    tags(
        (name = "greeting", description = "Root greeting endpoint"),
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User management endpoints"),
        (name = "lockers", description = "Locker management endpoints"),
    ),
    info(
        title = "LockRust API",
        description = "School Locker Management API - registration of students and the lockers assigned to them",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
