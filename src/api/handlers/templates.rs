//! Prize template handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use crate::api::AppState;
use crate::models::prize::{CreatePrizeTemplateRequest, PrizeTemplate, UpdatePrizeTemplateRequest};
use crate::utils::errors::{RaffleBuddyError, Result};

#[derive(Debug, Deserialize)]
pub struct TemplateQuery {
    pub name: Option<String>,
}

/// List prize templates, optionally filtered by name
pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<Vec<PrizeTemplate>>> {
    let templates = match query.name {
        Some(pattern) => state.services.raffle_service
            .get_prize_templates_by_name(&pattern)
            .await?,
        None => state.services.raffle_service.get_all_prize_templates().await?,
    };

    Ok(Json(templates))
}

/// Create a prize template
pub async fn create_template(
    State(state): State<AppState>,
    Json(request): Json<CreatePrizeTemplateRequest>,
) -> Result<(StatusCode, Json<PrizeTemplate>)> {
    if request.name.trim().is_empty() {
        return Err(RaffleBuddyError::InvalidInput(
            "Template name must not be empty".to_string()
        ));
    }

    let template = state.services.raffle_service.create_prize_template(request).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// Get one prize template
pub async fn get_template(
    State(state): State<AppState>,
    Path(template_id): Path<i64>,
) -> Result<Json<PrizeTemplate>> {
    let template = state.services.raffle_service
        .get_prize_template_by_id(template_id)
        .await?
        .ok_or(RaffleBuddyError::PrizeTemplateNotFound { template_id })?;

    Ok(Json(template))
}

/// Update a prize template
pub async fn update_template(
    State(state): State<AppState>,
    Path(template_id): Path<i64>,
    Json(request): Json<UpdatePrizeTemplateRequest>,
) -> Result<Json<PrizeTemplate>> {
    let template = state.services.raffle_service
        .update_prize_template(template_id, request)
        .await?;

    Ok(Json(template))
}

/// Delete a prize template
pub async fn delete_template(
    State(state): State<AppState>,
    Path(template_id): Path<i64>,
) -> Result<StatusCode> {
    state.services.raffle_service.delete_prize_template(template_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
