//! HTTP API module
//!
//! This module wires the application services into an axum router. Errors
//! bubbling out of the services are mapped to status codes with a JSON
//! error body, the way the original admin surface showed them per action.

pub mod handlers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};
use crate::middleware::auth::{require_admin, AuthMiddleware};
use crate::services::ServiceFactory;
use crate::utils::errors::{ErrorSeverity, MeetupError, RaffleBuddyError};

/// Shared state for all API handlers
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
    pub auth: AuthMiddleware,
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        // Events
        .route("/api/events", get(handlers::events::list_events))
        .route("/api/events/external", get(handlers::events::list_external_events))
        .route("/api/events/import", post(handlers::events::import_event))
        .route("/api/events/import/bulk", post(handlers::events::import_events))
        .route(
            "/api/events/{id}",
            get(handlers::events::get_event).delete(handlers::events::delete_event),
        )
        .route("/api/events/{id}/sync", post(handlers::events::sync_event_members))
        .route(
            "/api/events/{id}/participants",
            get(handlers::participants::list_participants),
        )
        .route(
            "/api/events/{id}/participants/eligible",
            get(handlers::participants::list_eligible_participants),
        )
        .route(
            "/api/events/{id}/reset-raffle-entries",
            post(handlers::participants::reset_raffle_entries),
        )
        // Members
        .route(
            "/api/members",
            get(handlers::members::list_members).post(handlers::members::create_member),
        )
        .route(
            "/api/members/{id}",
            get(handlers::members::get_member)
                .put(handlers::members::update_member)
                .delete(handlers::members::delete_member),
        )
        // Participants
        .route("/api/participants/{id}", get(handlers::participants::get_participant))
        .route(
            "/api/participants/{id}/mark-attended",
            post(handlers::participants::mark_attended),
        )
        .route(
            "/api/participants/{id}/mark-no-show",
            post(handlers::participants::mark_no_show),
        )
        .route(
            "/api/participants/{id}/reset-attendance",
            post(handlers::participants::reset_attendance),
        )
        .route(
            "/api/participants/{id}/enter-raffle",
            post(handlers::participants::enter_raffle),
        )
        .route(
            "/api/participants/{id}/withdraw-raffle",
            post(handlers::participants::withdraw_raffle),
        )
        .route(
            "/api/participants/{id}/mark-attended-entered",
            post(handlers::participants::mark_attended_entered),
        )
        .route(
            "/api/participants/{id}/mark-no-show-entered",
            post(handlers::participants::mark_no_show_entered),
        )
        // Raffles and drawing
        .route(
            "/api/raffles",
            get(handlers::raffles::list_raffles).post(handlers::raffles::create_raffle),
        )
        .route(
            "/api/raffles/{id}",
            get(handlers::raffles::get_raffle).delete(handlers::raffles::delete_raffle),
        )
        .route(
            "/api/raffles/{id}/prizes",
            get(handlers::prizes::list_prizes).post(handlers::prizes::create_prize),
        )
        .route(
            "/api/raffles/{id}/prizes/from-template",
            post(handlers::prizes::create_prize_from_template),
        )
        .route("/api/raffles/{id}/eligible", get(handlers::drawing::list_eligible))
        .route("/api/raffles/{id}/draw", post(handlers::drawing::draw_winner))
        // Prizes
        .route(
            "/api/prizes/{id}",
            get(handlers::prizes::get_prize)
                .put(handlers::prizes::update_prize)
                .delete(handlers::prizes::delete_prize),
        )
        .route("/api/prizes/{id}/award", post(handlers::prizes::award_prize))
        // Prize templates
        .route(
            "/api/prize-templates",
            get(handlers::templates::list_templates).post(handlers::templates::create_template),
        )
        .route(
            "/api/prize-templates/{id}",
            get(handlers::templates::get_template)
                .put(handlers::templates::update_template)
                .delete(handlers::templates::delete_template),
        )
        // Sample data and statistics
        .route("/api/data/init", post(handlers::data::init_sample_data))
        .route("/api/stats", get(handlers::data::system_stats))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/api/health", get(handlers::health::health))
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for RaffleBuddyError {
    fn into_response(self) -> Response {
        let status = match &self {
            RaffleBuddyError::EventNotFound { .. }
            | RaffleBuddyError::MeetupEventNotFound { .. }
            | RaffleBuddyError::MemberNotFound { .. }
            | RaffleBuddyError::ParticipantNotFound { .. }
            | RaffleBuddyError::RaffleNotFound { .. }
            | RaffleBuddyError::PrizeNotFound { .. }
            | RaffleBuddyError::PrizeTemplateNotFound { .. } => StatusCode::NOT_FOUND,
            RaffleBuddyError::RaffleAlreadyExists { .. }
            | RaffleBuddyError::NoEligibleParticipants { .. } => StatusCode::CONFLICT,
            RaffleBuddyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RaffleBuddyError::Authentication(_) => StatusCode::UNAUTHORIZED,
            RaffleBuddyError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            RaffleBuddyError::Meetup(MeetupError::Timeout)
            | RaffleBuddyError::Meetup(MeetupError::ServiceUnavailable) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                error!(error = %self, status = %status, "Request failed")
            }
            _ => warn!(error = %self, status = %status, "Request rejected"),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
