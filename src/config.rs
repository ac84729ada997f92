use anyhow::Result;
use sea_orm::Database;

use crate::schemas::AppState;

/// Connect to the database and build the shared application state
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState { db })
}
