//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub meetup: MeetupConfig,
    pub logging: LoggingConfig,
    pub features: FeaturesConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub admin_tokens: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    pub url: String,
    pub prefix: String,
    pub ttl_seconds: u64,
}

/// Meetup GraphQL proxy configuration
///
/// The proxy is fronted by a Keycloak realm; the client authenticates with a
/// client-credentials grant against the realm's token endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeetupConfig {
    pub server_url: String,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
    pub group_urlname: String,
    pub timeout_seconds: u64,
    pub rsvp_page_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
    pub max_file_size: String,
    pub max_files: u32,
}

/// Feature flags configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeaturesConfig {
    pub security: bool,
    pub mock_meetup: bool,
    pub sample_data: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("RAFFLEBUDDY"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::RaffleBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                admin_tokens: vec![],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/rafflebuddy".to_string(),
                max_connections: 10,
                min_connections: 1,
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                prefix: "rafflebuddy:".to_string(),
                ttl_seconds: 3600,
            },
            meetup: MeetupConfig {
                server_url: "https://keycloak.example.com".to_string(),
                realm: "meetup".to_string(),
                client_id: String::new(),
                client_secret: String::new(),
                group_urlname: "java-vienna".to_string(),
                timeout_seconds: 10,
                rsvp_page_size: 300,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "/var/log/rafflebuddy".to_string(),
                max_file_size: "10MB".to_string(),
                max_files: 5,
            },
            features: FeaturesConfig {
                security: true,
                mock_meetup: false,
                sample_data: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.meetup.rsvp_page_size, 300);
        assert!(settings.database.url.contains("postgresql://"));
        assert!(settings.features.security);
    }
}
