//! Tests for the Keycloak-fronted Meetup client against a mocked proxy

use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use RaffleBuddy::config::settings::{MeetupConfig, Settings};
use RaffleBuddy::services::meetup::KeycloakMeetupClient;
use RaffleBuddy::services::meetup_mock;
use RaffleBuddy::services::redis::RedisService;
use RaffleBuddy::utils::errors::{MeetupError, RaffleBuddyError};

fn meetup_config(server_url: &str) -> MeetupConfig {
    MeetupConfig {
        server_url: server_url.to_string(),
        realm: "meetup".to_string(),
        client_id: "raffle-client".to_string(),
        client_secret: "s3cr3t".to_string(),
        group_urlname: "java-vienna".to_string(),
        timeout_seconds: 5,
        rsvp_page_size: 300,
    }
}

/// Redis pointing nowhere; token caching degrades to per-call fetches
fn offline_redis() -> RedisService {
    let mut settings = Settings::default();
    settings.redis.url = "redis://127.0.0.1:1".to_string();
    RedisService::new(settings).expect("Failed to build redis service")
}

async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/realms/meetup/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "expires_in": 300,
            "token_type": "Bearer"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_event_with_rsvps() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path("/realms/meetup/meetup-proxy/gql"))
        .and(body_string_contains("event(id:\\\"305897255\\\")"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(meetup_mock::EVENT_305897255_RESPONSE),
        )
        .mount(&server)
        .await;

    let client = KeycloakMeetupClient::new(meetup_config(&server.uri()), offline_redis())
        .expect("Failed to build client");

    let event = client
        .get_event_with_rsvps("305897255")
        .await
        .expect("Request failed")
        .expect("Event missing");

    assert_eq!(event.event.id, "305897255");
    assert_eq!(event.rsvps.len(), 4);
    assert_eq!(event.rsvps.iter().filter(|r| r.is_host).count(), 1);
}

#[tokio::test]
async fn test_get_group_events() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path("/realms/meetup/meetup-proxy/gql"))
        .and(body_string_contains("groupByUrlname"))
        .respond_with(ResponseTemplate::new(200).set_body_string(meetup_mock::EVENTS_RESPONSE))
        .mount(&server)
        .await;

    let client = KeycloakMeetupClient::new(meetup_config(&server.uri()), offline_redis())
        .expect("Failed to build client");

    let events = client.get_group_events().await.expect("Request failed");
    assert_eq!(events.len(), 3);
    assert!(events.iter().any(|e| e.title.contains("Java on AWS")));
}

#[tokio::test]
async fn test_unparseable_response_degrades_to_empty() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path("/realms/meetup/meetup-proxy/gql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = KeycloakMeetupClient::new(meetup_config(&server.uri()), offline_redis())
        .expect("Failed to build client");

    // Malformed payloads are logged and swallowed at the adapter boundary
    assert!(client.get_event("305897255").await.unwrap().is_none());
    assert!(client.get_group_events().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_token_is_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/realms/meetup/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client"
        })))
        .mount(&server)
        .await;

    let client = KeycloakMeetupClient::new(meetup_config(&server.uri()), offline_redis())
        .expect("Failed to build client");

    let result = client.get_event("305897255").await;
    assert!(matches!(
        result,
        Err(RaffleBuddyError::Meetup(MeetupError::Unauthorized))
    ));
}

#[tokio::test]
async fn test_proxy_error_is_request_failed() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    Mock::given(method("POST"))
        .and(path("/realms/meetup/meetup-proxy/gql"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = KeycloakMeetupClient::new(meetup_config(&server.uri()), offline_redis())
        .expect("Failed to build client");

    let result = client.get_event("305897255").await;
    assert!(matches!(
        result,
        Err(RaffleBuddyError::Meetup(MeetupError::RequestFailed(_)))
    ));
}
