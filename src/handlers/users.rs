use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use crate::services::UserService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::user;
use sea_orm::{DbErr, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Registration number (must be unique)
    pub rm: i32,
    /// Student name
    pub name: String,
    /// Student email
    pub email: String,
    /// Class group, e.g. "3A"
    pub class_group: String,
    /// Number of the locker assigned to this student
    pub locker_id: Option<i32>,
}

/// Request body for updating a user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    /// Student name
    pub name: Option<String>,
    /// Student email
    pub email: Option<String>,
    /// Class group
    pub class_group: Option<String>,
    /// Number of the locker assigned to this student
    pub locker_id: Option<i32>,
}

/// User response model
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub rm: i32,
    pub name: String,
    pub email: String,
    pub class_group: String,
    pub locker_id: Option<i32>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            rm: model.rm,
            name: model.name,
            email: model.email,
            class_group: model.class_group,
            locker_id: model.locker_id,
        }
    }
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_user function");
    debug!("Creating user with rm: {}, name: {}", request.rm, request.name);

    let new_user = user::ActiveModel {
        rm: Set(request.rm),
        name: Set(request.name.clone()),
        email: Set(request.email.clone()),
        class_group: Set(request.class_group.clone()),
        locker_id: Set(request.locker_id),
    };

    trace!("Attempting to insert new user into database");
    match UserService::new(state.db.clone()).create(new_user).await {
        Ok(user_model) => {
            info!(
                "User created successfully with rm: {}, name: {}",
                user_model.rm, user_model.name
            );
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create user with rm {}: {}", request.rm, db_error);

            // Handle specific database errors
            let error_response = match db_error {
                DbErr::Exec(ref exec_err) => {
                    // Check for unique constraint violations
                    let error_msg = exec_err.to_string().to_lowercase();
                    if error_msg.contains("unique") || error_msg.contains("constraint") {
                        ErrorResponse {
                            error: format!(
                                "Registration number {} already exists or the locker is already assigned",
                                request.rm
                            ),
                            code: "USER_ALREADY_EXISTS".to_string(),
                            success: false,
                        }
                    } else {
                        ErrorResponse {
                            error: "Failed to create user due to database constraint".to_string(),
                            code: "DATABASE_CONSTRAINT_ERROR".to_string(),
                            success: false,
                        }
                    }
                }
                _ => ErrorResponse {
                    error: "Internal server error while creating user".to_string(),
                    code: "DATABASE_ERROR".to_string(),
                    success: false,
                },
            };

            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(error_response)))
        }
    }
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, StatusCode> {
    trace!("Entering get_users function");
    debug!("Fetching all users from database");

    match UserService::new(state.db.clone()).list().await {
        Ok(users) => {
            let user_count = users.len();
            debug!("Retrieved {} users from database", user_count);

            let user_responses: Vec<UserResponse> =
                users.into_iter().map(UserResponse::from).collect();

            info!("Successfully retrieved {} users", user_count);
            let response = ApiResponse {
                data: user_responses,
                message: "Users retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve users from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific user by registration number
#[utoipa::path(
    get,
    path = "/api/v1/users/{rm}",
    tag = "users",
    params(
        ("rm" = i32, Path, description = "User registration number"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_by_rm(
    Path(rm): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, StatusCode> {
    trace!("Entering get_user_by_rm function for rm: {}", rm);

    match UserService::new(state.db.clone()).get_by_rm(rm).await {
        Ok(Some(user_model)) => {
            info!(
                "Successfully retrieved user with rm: {}, name: {}",
                user_model.rm, user_model.name
            );
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("User with rm {} not found", rm);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve user with rm {}: {}", rm, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get the first user matching a name
#[utoipa::path(
    get,
    path = "/api/v1/users/by-username/{username}",
    tag = "users",
    params(
        ("username" = String, Path, description = "Student name"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_by_username(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, StatusCode> {
    trace!("Entering get_user_by_username function for name: {}", username);

    match UserService::new(state.db.clone())
        .get_by_username(&username)
        .await
    {
        Ok(Some(user_model)) => {
            info!("Successfully retrieved user with name: {}", user_model.name);
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("User with name {} not found", username);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve user with name {}: {}", username, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get the first user matching an email
#[utoipa::path(
    get,
    path = "/api/v1/users/by-email/{email}",
    tag = "users",
    params(
        ("email" = String, Path, description = "Student email"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_by_email(
    Path(email): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, StatusCode> {
    trace!("Entering get_user_by_email function for email: {}", email);

    match UserService::new(state.db.clone()).get_by_email(&email).await {
        Ok(Some(user_model)) => {
            info!("Successfully retrieved user with email: {}", user_model.email);
            let response = ApiResponse {
                data: UserResponse::from(user_model),
                message: "User retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("User with email {} not found", email);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve user with email {}: {}", email, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{rm}",
    tag = "users",
    params(
        ("rm" = i32, Path, description = "User registration number"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_user(
    Path(rm): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, StatusCode> {
    trace!("Entering update_user function for rm: {}", rm);
    debug!("Updating user with rm: {}", rm);

    let service = UserService::new(state.db.clone());

    // First, find the existing user
    trace!("Looking up existing user with rm: {}", rm);
    let existing_user = match service.get_by_rm(rm).await {
        Ok(Some(user)) => {
            debug!("Found existing user: {}", user.name);
            user
        }
        Ok(None) => {
            warn!("User with rm {} not found for update", rm);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup user with rm {} for update: {}", rm, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Create active model for update
    let mut user_active: user::ActiveModel = existing_user.into();
    let mut updated_fields = Vec::new();

    // Update only provided fields
    if let Some(name) = request.name {
        debug!("Updating name to: {}", name);
        user_active.name = Set(name.clone());
        updated_fields.push(format!("name: {}", name));
    }
    if let Some(email) = request.email {
        debug!("Updating email to: {}", email);
        user_active.email = Set(email.clone());
        updated_fields.push(format!("email: {}", email));
    }
    if let Some(class_group) = request.class_group {
        debug!("Updating class_group to: {}", class_group);
        user_active.class_group = Set(class_group.clone());
        updated_fields.push(format!("class_group: {}", class_group));
    }
    if let Some(locker_id) = request.locker_id {
        debug!("Updating locker_id to: {}", locker_id);
        user_active.locker_id = Set(Some(locker_id));
        updated_fields.push(format!("locker_id: {}", locker_id));
    }

    if updated_fields.is_empty() {
        debug!("No fields to update for user rm: {}", rm);
    } else {
        debug!("Updating fields: {}", updated_fields.join(", "));
    }

    trace!("Attempting to update user in database");
    match service.update_by_rm(rm, user_active).await {
        Ok(updated_user) => {
            info!(
                "User with rm {} updated successfully. Updated fields: {}",
                rm,
                if updated_fields.is_empty() {
                    "none".to_string()
                } else {
                    updated_fields.join(", ")
                }
            );
            let response = ApiResponse {
                data: UserResponse::from(updated_user),
                message: "User updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(DbErr::RecordNotUpdated) => {
            warn!("User with rm {} disappeared before update", rm);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to update user with rm {}: {}", rm, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/v1/users/{rm}",
    tag = "users",
    params(
        ("rm" = i32, Path, description = "User registration number"),
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_user(
    Path(rm): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_user function for rm: {}", rm);
    debug!("Attempting to delete user with rm: {}", rm);

    match UserService::new(state.db.clone()).delete_by_rm(rm).await {
        Ok(delete_result) => {
            debug!(
                "Delete operation completed. Rows affected: {}",
                delete_result.rows_affected
            );
            if delete_result.rows_affected > 0 {
                info!("User with rm {} deleted successfully", rm);
                let response = ApiResponse {
                    data: format!("User {} deleted", rm),
                    message: "User deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("User with rm {} not found for deletion (no rows affected)", rm);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete user with rm {}: {}", rm, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
