//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the RaffleBuddy application.

use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "rafflebuddy.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log admin actions against raffles and participants
pub fn log_admin_action(action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log the outcome of an event/RSVP synchronization run
pub fn log_sync_result(event_id: i64, meetup_id: &str, synced: usize) {
    info!(
        event_id = event_id,
        meetup_id = %meetup_id,
        synced = synced,
        "Event synchronization completed"
    );
}

/// Log a winner drawing
pub fn log_draw_result(raffle_id: i64, participant_id: i64, eligible: usize) {
    info!(
        raffle_id = raffle_id,
        participant_id = participant_id,
        eligible = eligible,
        "Raffle winner drawn"
    );
}

/// Log external API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    error!(
        api = api,
        error = error,
        context = context,
        "API error occurred"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
