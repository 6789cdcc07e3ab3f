//! Meetup GraphQL proxy client implementation
//!
//! This service talks to the Meetup.com GraphQL API through a Keycloak-fronted
//! proxy: it fetches a bearer token from the realm's token endpoint with a
//! client-credentials grant (cached in Redis until shortly before expiry),
//! builds the query strings, and deserializes the ad-hoc JSON responses.
//!
//! A mock implementation serving embedded fixtures can be swapped in with the
//! `features.mock_meetup` flag.

use std::time::Duration;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::config::settings::{MeetupConfig, Settings};
use crate::services::meetup_mock;
use crate::services::redis::RedisService;
use crate::utils::errors::{MeetupError, RaffleBuddyError, Result};

const TOKEN_CACHE_KEY: &str = "meetup:access_token";
// Refresh the token slightly before Keycloak expires it
const TOKEN_EXPIRY_MARGIN_SECS: u64 = 30;

/// An event as reported by the Meetup API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetupEvent {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub event_url: Option<String>,
    pub status: Option<String>,
}

/// One RSVP row of an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetupRsvp {
    pub rsvp_id: String,
    pub member_id: String,
    pub name: String,
    pub email: Option<String>,
    pub is_host: bool,
}

/// An event together with its RSVP list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetupEventWithRsvps {
    pub event: MeetupEvent,
    pub rsvps: Vec<MeetupRsvp>,
}

/// Outbound Meetup client, either the Keycloak-fronted proxy or the mock
#[derive(Debug, Clone)]
pub enum MeetupClient {
    Keycloak(KeycloakMeetupClient),
    Mock(MockMeetupClient),
}

impl MeetupClient {
    /// Build the client selected by the `features.mock_meetup` flag
    pub fn from_settings(settings: &Settings, redis_service: RedisService) -> Result<Self> {
        if settings.features.mock_meetup {
            info!("Using mock Meetup client");
            Ok(MeetupClient::Mock(MockMeetupClient::new()))
        } else {
            Ok(MeetupClient::Keycloak(KeycloakMeetupClient::new(
                settings.meetup.clone(),
                redis_service,
            )?))
        }
    }

    /// Fetch one event's details
    pub async fn get_event(&self, meetup_id: &str) -> Result<Option<MeetupEvent>> {
        match self {
            MeetupClient::Keycloak(client) => client.get_event(meetup_id).await,
            MeetupClient::Mock(client) => client.get_event(meetup_id),
        }
    }

    /// Fetch one event together with its RSVP list
    pub async fn get_event_with_rsvps(&self, meetup_id: &str) -> Result<Option<MeetupEventWithRsvps>> {
        match self {
            MeetupClient::Keycloak(client) => client.get_event_with_rsvps(meetup_id).await,
            MeetupClient::Mock(client) => client.get_event_with_rsvps(meetup_id),
        }
    }

    /// Fetch the configured group's events
    pub async fn get_group_events(&self) -> Result<Vec<MeetupEvent>> {
        match self {
            MeetupClient::Keycloak(client) => client.get_group_events().await,
            MeetupClient::Mock(client) => client.get_group_events(),
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, MeetupClient::Mock(_))
    }
}

// ===== Wire format =====

#[derive(Debug, Serialize)]
struct GraphQlQuery {
    query: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct EventData {
    event: Option<EventNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventNode {
    id: String,
    title: String,
    description: Option<String>,
    date_time: Option<String>,
    event_url: Option<String>,
    status: Option<String>,
    rsvps: Option<RsvpConnection>,
}

#[derive(Debug, Deserialize)]
struct RsvpConnection {
    edges: Vec<RsvpEdge>,
}

#[derive(Debug, Deserialize)]
struct RsvpEdge {
    node: RsvpNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RsvpNode {
    id: Option<String>,
    is_host: Option<bool>,
    member: Option<MemberNode>,
}

#[derive(Debug, Deserialize)]
struct MemberNode {
    id: Option<String>,
    name: Option<String>,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupData {
    group_by_urlname: Option<GroupNode>,
}

#[derive(Debug, Deserialize)]
struct GroupNode {
    events: Option<EventConnection>,
}

#[derive(Debug, Deserialize)]
struct EventConnection {
    edges: Vec<EventEdge>,
}

#[derive(Debug, Deserialize)]
struct EventEdge {
    node: EventNode,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedToken {
    access_token: String,
}

impl EventNode {
    fn into_event(self) -> MeetupEvent {
        let date_time = self.date_time.as_deref().and_then(parse_event_date);
        MeetupEvent {
            id: self.id,
            title: self.title,
            description: self.description,
            date_time,
            event_url: self.event_url,
            status: self.status,
        }
    }

    fn into_event_with_rsvps(mut self) -> MeetupEventWithRsvps {
        let rsvps = self
            .rsvps
            .take()
            .map(|connection| {
                connection
                    .edges
                    .into_iter()
                    .filter_map(|edge| {
                        let node = edge.node;
                        let member = node.member?;
                        // RSVPs without a member id cannot be merged locally
                        let member_id = member.id?;
                        Some(MeetupRsvp {
                            rsvp_id: node.id.unwrap_or_default(),
                            member_id,
                            name: member.name.unwrap_or_default(),
                            email: member.email,
                            is_host: node.is_host.unwrap_or(false),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        MeetupEventWithRsvps {
            event: self.into_event(),
            rsvps,
        }
    }
}

/// Parse an event timestamp as reported by the API (RFC 3339 with offset)
fn parse_event_date(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            warn!(value = %value, error = %e, "Failed to parse event date");
            None
        }
    }
}

// ===== Keycloak-fronted client =====

/// Client for the Keycloak-fronted Meetup GraphQL proxy
#[derive(Debug, Clone)]
pub struct KeycloakMeetupClient {
    client: Client,
    config: MeetupConfig,
    redis_service: RedisService,
}

impl KeycloakMeetupClient {
    /// Create a new KeycloakMeetupClient instance
    pub fn new(config: MeetupConfig, redis_service: RedisService) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("RaffleBuddy/1.0")
            .build()
            .map_err(RaffleBuddyError::Http)?;

        Ok(Self {
            client,
            config,
            redis_service,
        })
    }

    fn realm_url(&self) -> String {
        format!(
            "{}/realms/{}",
            self.config.server_url.trim_end_matches('/'),
            self.config.realm
        )
    }

    fn gql_url(&self) -> String {
        format!("{}/meetup-proxy/gql", self.realm_url())
    }

    fn token_url(&self) -> String {
        format!("{}/protocol/openid-connect/token", self.realm_url())
    }

    /// Get a bearer token, from cache when available.
    /// Cache failures only cost an extra token request.
    async fn get_access_token(&self) -> Result<String> {
        match self.redis_service.get::<CachedToken>(TOKEN_CACHE_KEY).await {
            Ok(Some(cached)) => {
                debug!("Using cached Meetup access token");
                return Ok(cached.access_token);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to read cached access token"),
        }

        self.fetch_access_token().await
    }

    /// Fetch a fresh token via the client-credentials grant and cache it
    async fn fetch_access_token(&self) -> Result<String> {
        debug!(url = %self.token_url(), "Requesting Meetup access token");

        let response = self
            .client
            .post(self.token_url())
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RaffleBuddyError::Meetup(MeetupError::Unauthorized));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RaffleBuddyError::Meetup(MeetupError::RequestFailed(
                format!("Token endpoint HTTP {}: {}", status, error_text),
            )));
        }

        let token: TokenResponse = response.json().await
            .map_err(|e| RaffleBuddyError::Meetup(MeetupError::InvalidResponse(e.to_string())))?;

        let ttl = token.expires_in.saturating_sub(TOKEN_EXPIRY_MARGIN_SECS);
        if ttl > 0 {
            let cached = CachedToken {
                access_token: token.access_token.clone(),
            };
            if let Err(e) = self.redis_service.set(TOKEN_CACHE_KEY, &cached, Some(ttl)).await {
                warn!(error = %e, "Failed to cache access token");
            }
        }

        info!("Fetched new Meetup access token");
        Ok(token.access_token)
    }

    /// Execute a GraphQL query against the proxy
    async fn execute_query(&self, query: String) -> Result<String> {
        let token = self.get_access_token().await?;

        // The proxy rejects queries containing raw line breaks
        let query = query.replace("\r\n", " ").replace('\n', " ");

        debug!(url = %self.gql_url(), "Executing Meetup GraphQL query");

        let response = self
            .client
            .post(self.gql_url())
            .bearer_auth(token)
            .json(&GraphQlQuery { query })
            .send()
            .await
            .map_err(map_transport_error)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            // Token may have been revoked; drop the cache so the next call refreshes
            if let Err(e) = self.redis_service.delete(TOKEN_CACHE_KEY).await {
                warn!(error = %e, "Failed to drop cached access token");
            }
            return Err(RaffleBuddyError::Meetup(MeetupError::Unauthorized));
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(RaffleBuddyError::Meetup(MeetupError::RequestFailed(
                format!("HTTP {}: {}", status, error_text),
            )));
        }

        response.text().await
            .map_err(|e| RaffleBuddyError::Meetup(MeetupError::InvalidResponse(e.to_string())))
    }

    /// Fetch one event's details
    pub async fn get_event(&self, meetup_id: &str) -> Result<Option<MeetupEvent>> {
        let query = format!(
            "query {{ event(id:\"{}\") {{ id dateTime title description eventType eventUrl status }} }}",
            meetup_id
        );

        let body = self.execute_query(query).await?;
        match serde_json::from_str::<GraphQlResponse<EventData>>(&body) {
            Ok(response) => Ok(response
                .data
                .and_then(|data| data.event)
                .map(EventNode::into_event)),
            Err(e) => {
                warn!(meetup_id = %meetup_id, error = %e, "Failed to parse event response");
                Ok(None)
            }
        }
    }

    /// Fetch one event together with its RSVP list (single fixed-size page)
    pub async fn get_event_with_rsvps(&self, meetup_id: &str) -> Result<Option<MeetupEventWithRsvps>> {
        let query = format!(
            "query {{ event(id:\"{}\") {{ id dateTime title description eventType eventUrl status rsvps (first: {}) {{ edges {{ node {{ id isHost member {{ id email name }} }} }} }} }} }}",
            meetup_id, self.config.rsvp_page_size
        );

        let body = self.execute_query(query).await?;
        match serde_json::from_str::<GraphQlResponse<EventData>>(&body) {
            Ok(response) => Ok(response
                .data
                .and_then(|data| data.event)
                .map(EventNode::into_event_with_rsvps)),
            Err(e) => {
                warn!(meetup_id = %meetup_id, error = %e, "Failed to parse event RSVP response");
                Ok(None)
            }
        }
    }

    /// Fetch the configured group's events
    pub async fn get_group_events(&self) -> Result<Vec<MeetupEvent>> {
        let query = format!(
            "query {{ groupByUrlname (urlname: \"{}\") {{ id events {{ edges {{ node {{ id title dateTime description eventUrl status }} }} }} }} }}",
            self.config.group_urlname
        );

        let body = self.execute_query(query).await?;
        match serde_json::from_str::<GraphQlResponse<GroupData>>(&body) {
            Ok(response) => Ok(response
                .data
                .and_then(|data| data.group_by_urlname)
                .and_then(|group| group.events)
                .map(|events| {
                    events
                        .edges
                        .into_iter()
                        .map(|edge| edge.node.into_event())
                        .collect()
                })
                .unwrap_or_default()),
            Err(e) => {
                warn!(error = %e, "Failed to parse group events response");
                Ok(Vec::new())
            }
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> RaffleBuddyError {
    if e.is_timeout() {
        RaffleBuddyError::Meetup(MeetupError::Timeout)
    } else if e.is_connect() {
        RaffleBuddyError::Meetup(MeetupError::ServiceUnavailable)
    } else {
        RaffleBuddyError::Meetup(MeetupError::RequestFailed(e.to_string()))
    }
}

// ===== Mock client =====

/// Mock Meetup client serving embedded fixtures
#[derive(Debug, Clone, Default)]
pub struct MockMeetupClient;

impl MockMeetupClient {
    pub fn new() -> Self {
        Self
    }

    pub fn get_event(&self, meetup_id: &str) -> Result<Option<MeetupEvent>> {
        let body = meetup_mock::event_response(meetup_id);
        let response: GraphQlResponse<EventData> = serde_json::from_str(body)?;

        Ok(response
            .data
            .and_then(|data| data.event)
            .map(EventNode::into_event))
    }

    pub fn get_event_with_rsvps(&self, meetup_id: &str) -> Result<Option<MeetupEventWithRsvps>> {
        let body = meetup_mock::event_response(meetup_id);
        let response: GraphQlResponse<EventData> = serde_json::from_str(body)?;

        Ok(response
            .data
            .and_then(|data| data.event)
            .map(EventNode::into_event_with_rsvps))
    }

    pub fn get_group_events(&self) -> Result<Vec<MeetupEvent>> {
        let response: GraphQlResponse<GroupData> =
            serde_json::from_str(meetup_mock::EVENTS_RESPONSE)?;

        Ok(response
            .data
            .and_then(|data| data.group_by_urlname)
            .and_then(|group| group.events)
            .map(|events| {
                events
                    .edges
                    .into_iter()
                    .map(|edge| edge.node.into_event())
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_event_date() {
        let parsed = parse_event_date("2025-06-02T18:00:00+02:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-06-02T16:00:00+00:00");
        assert!(parse_event_date("not a date").is_none());
    }

    #[test]
    fn test_mock_group_events() {
        let client = MockMeetupClient::new();
        let events = client.get_group_events().unwrap();
        assert_eq!(events.len(), 3);
        assert!(events.iter().any(|e| e.id == "305897255"));
    }

    #[test]
    fn test_mock_event_with_rsvps() {
        let client = MockMeetupClient::new();
        let event = client.get_event_with_rsvps("305897255").unwrap().unwrap();

        assert_eq!(event.event.id, "305897255");
        assert_eq!(event.rsvps.len(), 4);

        let host = event.rsvps.iter().find(|r| r.is_host).unwrap();
        assert_eq!(host.name, "Eula Lane");

        let no_email = event.rsvps.iter().find(|r| r.name == "Milton Burns").unwrap();
        assert!(no_email.email.is_none());
    }

    #[test]
    fn test_mock_unknown_event_is_none() {
        let client = MockMeetupClient::new();
        assert!(client.get_event("999999").unwrap().is_none());
        assert!(client.get_event_with_rsvps("999999").unwrap().is_none());
    }

    #[test]
    fn test_event_node_without_rsvps() {
        let body = r#"{ "data": { "event": { "id": "1", "title": "t", "dateTime": null } } }"#;
        let response: GraphQlResponse<EventData> = serde_json::from_str(body).unwrap();
        let event = response.data.unwrap().event.unwrap().into_event_with_rsvps();
        assert!(event.rsvps.is_empty());
    }
}
