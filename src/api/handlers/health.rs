//! Health check handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use crate::api::AppState;

/// Report the health of the backing services
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let status = state.services.health_check().await;

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        code,
        Json(json!({
            "healthy": status.is_healthy(),
            "database": status.database_healthy,
            "redis": status.redis_healthy,
            "meetup_mock": status.meetup_mock,
            "issues": status.get_issues(),
        })),
    )
}
