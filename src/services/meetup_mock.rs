//! Embedded mock responses for the Meetup GraphQL proxy
//!
//! Used by the mock client in development and in tests, so the application
//! can run without Keycloak credentials or network access.

/// Response for the group events query
pub const EVENTS_RESPONSE: &str = r#"
{
  "data": {
    "groupByUrlname": {
      "id": "10250862",
      "events": {
        "edges": [
          {
            "node": {
              "id": "305897255",
              "title": "\"OpenRewrite in a Nutshell\" + \"how John started to like TDD\"",
              "dateTime": "2025-06-02T18:00:00+02:00",
              "description": "Agenda:\n18:00 doors open\n18:30 OpenRewrite in a Nutshell\n19:55 raffle\n20:00 how John started to like TDD",
              "eventUrl": "https://www.meetup.com/java-vienna/events/305897255/",
              "status": "ACTIVE"
            }
          },
          {
            "node": {
              "id": "305897281",
              "title": "Java on AWS Special",
              "dateTime": "2025-06-16T18:00:00+02:00",
              "description": "Joint meetup with AWS Vienna.\n19:55 Raffle",
              "eventUrl": "https://www.meetup.com/java-vienna/events/305897281/",
              "status": "ACTIVE"
            }
          },
          {
            "node": {
              "id": "306898838",
              "title": "\"Engineering a better Java build tool\" + \"Vaadin 24 in the real world\"",
              "dateTime": "2025-05-19T18:00:00+02:00",
              "description": "Joint Meetup with Scala Vienna.\n19:55 Raffle",
              "eventUrl": "https://www.meetup.com/java-vienna/events/306898838/",
              "status": "PAST"
            }
          }
        ]
      }
    }
  }
}
"#;

/// Response for the single-event query with RSVPs, event 305897255
pub const EVENT_305897255_RESPONSE: &str = r#"
{
  "data": {
    "event": {
      "id": "305897255",
      "title": "\"OpenRewrite in a Nutshell\" + \"how John started to like TDD\"",
      "dateTime": "2025-06-02T18:00:00+02:00",
      "description": "Agenda:\n18:00 doors open\n18:30 OpenRewrite in a Nutshell\n19:55 raffle\n20:00 how John started to like TDD",
      "eventUrl": "https://www.meetup.com/java-vienna/events/305897255/",
      "status": "ACTIVE",
      "rsvps": {
        "edges": [
          {
            "node": {
              "id": "rsvp-1001",
              "isHost": true,
              "member": { "id": "188374001", "name": "Eula Lane", "email": "eula.lane@jigrormo.ye" }
            }
          },
          {
            "node": {
              "id": "rsvp-1002",
              "isHost": false,
              "member": { "id": "188374002", "name": "Barry Rodriquez", "email": "barry.rodriquez@zun.mm" }
            }
          },
          {
            "node": {
              "id": "rsvp-1003",
              "isHost": false,
              "member": { "id": "188374003", "name": "Leta Kelley", "email": "leta.kelley@wudawpe.sa" }
            }
          },
          {
            "node": {
              "id": "rsvp-1004",
              "isHost": false,
              "member": { "id": "188374004", "name": "Milton Burns", "email": null }
            }
          }
        ]
      }
    }
  }
}
"#;

/// Response for the single-event query with RSVPs, event 306898838
pub const EVENT_306898838_RESPONSE: &str = r#"
{
  "data": {
    "event": {
      "id": "306898838",
      "title": "\"Engineering a better Java build tool\" + \"Vaadin 24 in the real world\"",
      "dateTime": "2025-05-19T18:00:00+02:00",
      "description": "Joint Meetup with Scala Vienna.\n19:55 Raffle",
      "eventUrl": "https://www.meetup.com/java-vienna/events/306898838/",
      "status": "PAST",
      "rsvps": {
        "edges": [
          {
            "node": {
              "id": "rsvp-2001",
              "isHost": true,
              "member": { "id": "188374001", "name": "Eula Lane", "email": "eula.lane@jigrormo.ye" }
            }
          },
          {
            "node": {
              "id": "rsvp-2002",
              "isHost": false,
              "member": { "id": "188374005", "name": "Amelia Schwartz", "email": "amelia.schwartz@duvhu.va" }
            }
          }
        ]
      }
    }
  }
}
"#;

/// Response for an unknown event id
pub const EVENT_NOT_FOUND_RESPONSE: &str = r#"{ "data": { "event": null } }"#;

/// Look up the canned event response for a meetup event id
pub fn event_response(meetup_id: &str) -> &'static str {
    match meetup_id {
        "305897255" => EVENT_305897255_RESPONSE,
        "306898838" => EVENT_306898838_RESPONSE,
        _ => EVENT_NOT_FOUND_RESPONSE,
    }
}
