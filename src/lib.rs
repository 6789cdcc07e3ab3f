//! RaffleBuddy
//!
//! A backend service for meetup group raffle management.
//! This library provides modular components for importing events and RSVPs
//! from the Meetup API, tracking attendance, managing prizes and reusable
//! prize templates, and drawing random winners among eligible attendees.

#![allow(non_snake_case)]

pub mod api;
pub mod config;
pub mod database;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{RaffleBuddyError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
