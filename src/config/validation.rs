//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{RaffleBuddyError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(settings)?;
    validate_database_config(&settings.database)?;
    validate_redis_config(&settings.redis)?;
    validate_meetup_config(settings)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(settings: &Settings) -> Result<()> {
    let config = &settings.server;

    if config.host.is_empty() {
        return Err(RaffleBuddyError::Config(
            "Server host is required".to_string()
        ));
    }

    if settings.features.security && config.admin_tokens.is_empty() {
        return Err(RaffleBuddyError::Config(
            "At least one admin token must be configured when security is enabled".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(RaffleBuddyError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(RaffleBuddyError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(RaffleBuddyError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(RaffleBuddyError::Config(
            "Redis URL is required".to_string()
        ));
    }

    Ok(())
}

/// Validate Meetup proxy configuration
fn validate_meetup_config(settings: &Settings) -> Result<()> {
    let config = &settings.meetup;

    if settings.features.mock_meetup {
        // Mock client needs no credentials
        return Ok(());
    }

    if config.server_url.is_empty() {
        return Err(RaffleBuddyError::Config(
            "Meetup Keycloak server URL is required".to_string()
        ));
    }

    url::Url::parse(&config.server_url)
        .map_err(|e| RaffleBuddyError::Config(format!("Invalid Meetup server URL: {}", e)))?;

    if config.realm.is_empty() {
        return Err(RaffleBuddyError::Config(
            "Meetup Keycloak realm is required".to_string()
        ));
    }

    if config.client_id.is_empty() || config.client_secret.is_empty() {
        return Err(RaffleBuddyError::Config(
            "Meetup client credentials are required".to_string()
        ));
    }

    if config.group_urlname.is_empty() {
        return Err(RaffleBuddyError::Config(
            "Meetup group urlname is required".to_string()
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(RaffleBuddyError::Config(
            "Meetup timeout must be greater than 0".to_string()
        ));
    }

    if config.rsvp_page_size == 0 {
        return Err(RaffleBuddyError::Config(
            "Meetup RSVP page size must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(RaffleBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(RaffleBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_settings() -> Settings {
        let mut settings = Settings::default();
        settings.features.mock_meetup = true;
        settings.features.security = false;
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        let settings = mock_settings();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_security_requires_admin_tokens() {
        let mut settings = mock_settings();
        settings.features.security = true;
        assert!(validate_settings(&settings).is_err());

        settings.server.admin_tokens = vec!["secret-token".to_string()];
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_meetup_credentials_required_without_mock() {
        let mut settings = mock_settings();
        settings.features.mock_meetup = false;
        assert!(validate_settings(&settings).is_err());

        settings.meetup.client_id = "raffle-client".to_string();
        settings.meetup.client_secret = "s3cr3t".to_string();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = mock_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_pool_bounds() {
        let mut settings = mock_settings();
        settings.database.min_connections = 20;
        assert!(validate_settings(&settings).is_err());
    }
}
