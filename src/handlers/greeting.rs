use axum::response::Json;
use tracing::instrument;

use crate::schemas::GreetingResponse;

/// Root greeting endpoint.
///
/// Always responds with the same payload, regardless of database state.
#[utoipa::path(
    get,
    path = "/",
    tag = "greeting",
    responses(
        (status = 200, description = "Static greeting payload", body = GreetingResponse)
    )
)]
#[instrument]
pub async fn greeting() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "Hello World!".to_string(),
    })
}
