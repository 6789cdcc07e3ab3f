//! Sample data handlers

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use crate::api::AppState;
use crate::utils::errors::Result;

/// Initialize sample data
/// Can be triggered with: curl -X POST http://localhost:8080/api/data/init
pub async fn init_sample_data(State(state): State<AppState>) -> Result<Json<Value>> {
    let summary = state.services.sample_data_service.load_sample_data().await?;
    Ok(Json(summary))
}

/// Report row counts for the admin dashboard
pub async fn system_stats(State(state): State<AppState>) -> Result<Json<Value>> {
    let stats = state.services.database.get_system_stats().await?;
    Ok(Json(stats))
}
