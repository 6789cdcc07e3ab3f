//! Authentication middleware
//!
//! This module provides bearer-token authentication for the admin API.
//! The check is disabled entirely when the `security` feature flag is off,
//! which is the development setup.

use std::collections::HashSet;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};
use crate::api::AppState;
use crate::config::settings::Settings;
use crate::utils::errors::{RaffleBuddyError, Result};

/// Authentication middleware
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    admin_tokens: HashSet<String>,
    enabled: bool,
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware instance
    pub fn new(settings: &Settings) -> Self {
        let admin_tokens: HashSet<String> = settings.server.admin_tokens.iter().cloned().collect();

        Self {
            admin_tokens,
            enabled: settings.features.security,
        }
    }

    /// Check if authentication is enforced
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check if a token belongs to an admin
    pub fn is_admin_token(&self, token: &str) -> bool {
        self.admin_tokens.contains(token)
    }

    /// Authorize a request from its Authorization header value
    pub fn authorize(&self, authorization: Option<&str>) -> Result<()> {
        if !self.enabled {
            debug!("Security disabled, request allowed");
            return Ok(());
        }

        let token = authorization
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                RaffleBuddyError::Authentication("Missing bearer token".to_string())
            })?;

        if self.is_admin_token(token) {
            debug!("Admin authentication successful");
            Ok(())
        } else {
            warn!("Unauthorized admin access attempt");
            Err(RaffleBuddyError::PermissionDenied(
                "Admin privileges required".to_string()
            ))
        }
    }
}

/// axum middleware enforcing admin authentication on the API routes
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> std::result::Result<Response, RaffleBuddyError> {
    let authorization = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state.auth.authorize(authorization)?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_tokens(security: bool, tokens: &[&str]) -> Settings {
        let mut settings = Settings::default();
        settings.features.security = security;
        settings.server.admin_tokens = tokens.iter().map(|t| t.to_string()).collect();
        settings
    }

    #[test]
    fn test_admin_token_check() {
        let auth = AuthMiddleware::new(&settings_with_tokens(true, &["alpha", "beta"]));

        assert!(auth.is_admin_token("alpha"));
        assert!(auth.is_admin_token("beta"));
        assert!(!auth.is_admin_token("gamma"));
    }

    #[test]
    fn test_authorize_with_valid_token() {
        let auth = AuthMiddleware::new(&settings_with_tokens(true, &["alpha"]));
        assert!(auth.authorize(Some("Bearer alpha")).is_ok());
    }

    #[test]
    fn test_authorize_rejects_bad_tokens() {
        let auth = AuthMiddleware::new(&settings_with_tokens(true, &["alpha"]));

        assert!(auth.authorize(None).is_err());
        assert!(auth.authorize(Some("alpha")).is_err());
        assert!(auth.authorize(Some("Bearer wrong")).is_err());
    }

    #[test]
    fn test_authorize_passes_when_disabled() {
        let auth = AuthMiddleware::new(&settings_with_tokens(false, &[]));
        assert!(auth.authorize(None).is_ok());
    }
}
