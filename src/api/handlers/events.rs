//! Event handlers
//!
//! Listing local and external events, importing from the Meetup API, and
//! triggering RSVP synchronization.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::models::event::Event;
use crate::services::sync::ImportReport;
use crate::services::MeetupEvent;
use crate::utils::errors::{RaffleBuddyError, Result};

#[derive(Debug, Deserialize)]
pub struct ImportEventRequest {
    pub meetup_id: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkImportRequest {
    pub meetup_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportEventResponse {
    pub event: Event,
    pub synced_participants: usize,
}

/// List all locally stored events
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let events = state.services.sync_service.get_all_events().await?;
    Ok(Json(events))
}

/// List the group's events as reported by the external Meetup API
pub async fn list_external_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<MeetupEvent>>> {
    let events = state.services.sync_service.get_external_events().await?;
    Ok(Json(events))
}

/// Get one locally stored event
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Event>> {
    let event = state.services.sync_service.get_event_by_id(event_id).await?
        .ok_or(RaffleBuddyError::EventNotFound { event_id })?;

    Ok(Json(event))
}

/// Delete a locally stored event
pub async fn delete_event(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<StatusCode> {
    state.services.sync_service.delete_event(event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Import one event from the Meetup API and sync its RSVPs
pub async fn import_event(
    State(state): State<AppState>,
    Json(request): Json<ImportEventRequest>,
) -> Result<(StatusCode, Json<ImportEventResponse>)> {
    if request.meetup_id.trim().is_empty() {
        return Err(RaffleBuddyError::InvalidInput(
            "meetup_id must not be empty".to_string()
        ));
    }

    let (event, synced_participants) = state.services.sync_service
        .import_event(&request.meetup_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ImportEventResponse {
            event,
            synced_participants,
        }),
    ))
}

/// Import several selected events serially, reporting per-event outcomes
pub async fn import_events(
    State(state): State<AppState>,
    Json(request): Json<BulkImportRequest>,
) -> Result<Json<ImportReport>> {
    if request.meetup_ids.is_empty() {
        return Err(RaffleBuddyError::InvalidInput(
            "meetup_ids must not be empty".to_string()
        ));
    }

    let report = state.services.sync_service.import_events(&request.meetup_ids).await;
    Ok(Json(report))
}

/// Sync members and RSVPs for a locally stored event
pub async fn sync_event_members(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<Value>> {
    let synced = state.services.sync_service.sync_event_members(event_id).await?;
    Ok(Json(json!({ "synced_participants": synced })))
}
