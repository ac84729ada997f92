use crate::schemas::{ApiResponse, AppState, ErrorResponse};
use crate::services::LockerService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use model::entities::locker;
use sea_orm::{DbErr, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for creating a new locker
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateLockerRequest {
    /// Locker number (must be unique)
    pub number: i32,
    /// Where the locker is, e.g. "B wing, ground floor"
    pub location: Option<String>,
}

/// Request body for updating a locker
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateLockerRequest {
    /// Where the locker is
    pub location: Option<String>,
}

/// Locker response model
#[derive(Debug, Serialize, ToSchema)]
pub struct LockerResponse {
    pub number: i32,
    pub location: Option<String>,
}

impl From<locker::Model> for LockerResponse {
    fn from(model: locker::Model) -> Self {
        Self {
            number: model.number,
            location: model.location,
        }
    }
}

/// Create a new locker
#[utoipa::path(
    post,
    path = "/api/v1/lockers",
    tag = "lockers",
    request_body = CreateLockerRequest,
    responses(
        (status = 201, description = "Locker created successfully", body = ApiResponse<LockerResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_locker(
    State(state): State<AppState>,
    Json(request): Json<CreateLockerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LockerResponse>>), StatusCode> {
    trace!("Entering create_locker function");
    debug!("Creating locker with number: {}", request.number);

    let new_locker = locker::ActiveModel {
        number: Set(request.number),
        location: Set(request.location.clone()),
    };

    trace!("Attempting to insert new locker into database");
    match LockerService::new(state.db.clone()).create(new_locker).await {
        Ok(locker_model) => {
            info!("Locker created successfully with number: {}", locker_model.number);
            let response = ApiResponse {
                data: LockerResponse::from(locker_model),
                message: "Locker created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create locker {}: {}", request.number, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all lockers
#[utoipa::path(
    get,
    path = "/api/v1/lockers",
    tag = "lockers",
    responses(
        (status = 200, description = "Lockers retrieved successfully", body = ApiResponse<Vec<LockerResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_lockers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LockerResponse>>>, StatusCode> {
    trace!("Entering get_lockers function");
    debug!("Fetching all lockers from database");

    match LockerService::new(state.db.clone()).list().await {
        Ok(lockers) => {
            let locker_count = lockers.len();
            debug!("Retrieved {} lockers from database", locker_count);

            let locker_responses: Vec<LockerResponse> =
                lockers.into_iter().map(LockerResponse::from).collect();

            info!("Successfully retrieved {} lockers", locker_count);
            let response = ApiResponse {
                data: locker_responses,
                message: "Lockers retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve lockers from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific locker by number
#[utoipa::path(
    get,
    path = "/api/v1/lockers/{number}",
    tag = "lockers",
    params(
        ("number" = i32, Path, description = "Locker number"),
    ),
    responses(
        (status = 200, description = "Locker retrieved successfully", body = ApiResponse<LockerResponse>),
        (status = 404, description = "Locker not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_locker(
    Path(number): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LockerResponse>>, StatusCode> {
    trace!("Entering get_locker function for number: {}", number);

    match LockerService::new(state.db.clone()).get_by_number(number).await {
        Ok(Some(locker_model)) => {
            info!("Successfully retrieved locker with number: {}", locker_model.number);
            let response = ApiResponse {
                data: LockerResponse::from(locker_model),
                message: "Locker retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Locker with number {} not found", number);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve locker with number {}: {}", number, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a locker
#[utoipa::path(
    put,
    path = "/api/v1/lockers/{number}",
    tag = "lockers",
    params(
        ("number" = i32, Path, description = "Locker number"),
    ),
    request_body = UpdateLockerRequest,
    responses(
        (status = 200, description = "Locker updated successfully", body = ApiResponse<LockerResponse>),
        (status = 404, description = "Locker not found", body = ErrorResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_locker(
    Path(number): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateLockerRequest>,
) -> Result<Json<ApiResponse<LockerResponse>>, StatusCode> {
    trace!("Entering update_locker function for number: {}", number);
    debug!("Updating locker with number: {}", number);

    let service = LockerService::new(state.db.clone());

    // First, find the existing locker
    trace!("Looking up existing locker with number: {}", number);
    let existing_locker = match service.get_by_number(number).await {
        Ok(Some(locker)) => locker,
        Ok(None) => {
            warn!("Locker with number {} not found for update", number);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup locker with number {} for update: {}",
                number, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Create active model for update
    let mut locker_active: locker::ActiveModel = existing_locker.into();

    // Update only provided fields
    if let Some(location) = request.location {
        debug!("Updating location to: {}", location);
        locker_active.location = Set(Some(location));
    }

    trace!("Attempting to update locker in database");
    match service.update_by_number(number, locker_active).await {
        Ok(updated_locker) => {
            info!("Locker with number {} updated successfully", number);
            let response = ApiResponse {
                data: LockerResponse::from(updated_locker),
                message: "Locker updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(DbErr::RecordNotUpdated) => {
            warn!("Locker with number {} disappeared before update", number);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to update locker with number {}: {}", number, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a locker
#[utoipa::path(
    delete,
    path = "/api/v1/lockers/{number}",
    tag = "lockers",
    params(
        ("number" = i32, Path, description = "Locker number"),
    ),
    responses(
        (status = 200, description = "Locker deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Locker not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_locker(
    Path(number): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_locker function for number: {}", number);
    debug!("Attempting to delete locker with number: {}", number);

    match LockerService::new(state.db.clone()).delete_by_number(number).await {
        Ok(delete_result) => {
            debug!(
                "Delete operation completed. Rows affected: {}",
                delete_result.rows_affected
            );
            if delete_result.rows_affected > 0 {
                info!("Locker with number {} deleted successfully", number);
                let response = ApiResponse {
                    data: format!("Locker {} deleted", number),
                    message: "Locker deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!(
                    "Locker with number {} not found for deletion (no rows affected)",
                    number
                );
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete locker with number {}: {}", number, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get the locker held by the user with the given registration number
#[utoipa::path(
    get,
    path = "/api/v1/users/{rm}/locker",
    tag = "lockers",
    params(
        ("rm" = i32, Path, description = "User registration number"),
    ),
    responses(
        (status = 200, description = "Locker retrieved successfully", body = ApiResponse<LockerResponse>),
        (status = 404, description = "User not found or no locker assigned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_locker(
    Path(rm): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LockerResponse>>, StatusCode> {
    trace!("Entering get_user_locker function for rm: {}", rm);

    match LockerService::new(state.db.clone()).get_for_user_rm(rm).await {
        Ok(Some(locker_model)) => {
            info!(
                "Successfully retrieved locker {} for user with rm {}",
                locker_model.number, rm
            );
            let response = ApiResponse {
                data: LockerResponse::from(locker_model),
                message: "Locker retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("No locker found for user with rm {}", rm);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve locker for user with rm {}: {}", rm, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get the locker held by the first user matching a name
#[utoipa::path(
    get,
    path = "/api/v1/users/by-username/{username}/locker",
    tag = "lockers",
    params(
        ("username" = String, Path, description = "Student name"),
    ),
    responses(
        (status = 200, description = "Locker retrieved successfully", body = ApiResponse<LockerResponse>),
        (status = 404, description = "User not found or no locker assigned", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_user_locker_by_username(
    Path(username): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<LockerResponse>>, StatusCode> {
    trace!(
        "Entering get_user_locker_by_username function for name: {}",
        username
    );

    match LockerService::new(state.db.clone())
        .get_for_username(&username)
        .await
    {
        Ok(Some(locker_model)) => {
            info!(
                "Successfully retrieved locker {} for user named {}",
                locker_model.number, username
            );
            let response = ApiResponse {
                data: LockerResponse::from(locker_model),
                message: "Locker retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("No locker found for user named {}", username);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve locker for user named {}: {}",
                username, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
