//! Integration tests for attendee registration and fan-out.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use conferencehub_core::config::messaging::{MessagingConfig, ServiceBusConfig};

use crate::helpers::{TestApp, TestAppOptions};

#[tokio::test]
async fn test_register_increments_count() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/sessions/1/registrations",
            Some(json!({ "attendee_name": "Alice", "attendee_email": "alice@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["id"], 1);
    assert_eq!(response.data()["session_id"], 1);
    assert_eq!(response.data()["attendee_name"], "Alice");

    let session = app.request("GET", "/api/sessions/1", None, None).await;
    assert_eq!(session.data()["current_registrations"], 1);
    assert_eq!(session.data()["seats_remaining"], 1);
}

#[tokio::test]
async fn test_capacity_is_advisory() {
    let app = TestApp::new().await;

    for i in 0..3 {
        let response = app
            .request(
                "POST",
                "/api/sessions/1/registrations",
                Some(json!({
                    "attendeeName": format!("Attendee {i}"),
                    "attendeeEmail": format!("a{i}@example.com"),
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let session = app.request("GET", "/api/sessions/1", None, None).await;
    assert_eq!(session.data()["current_registrations"], 3);
    assert_eq!(session.data()["seats_remaining"], 0);
    assert_eq!(session.data()["is_full"], true);
}

#[tokio::test]
async fn test_register_for_missing_session_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/sessions/42/registrations",
            Some(json!({ "attendee_name": "Alice", "attendee_email": "alice@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(app.store.list_registrations().await.is_empty());
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/sessions/1/registrations",
            Some(json!({ "attendee_name": "Alice", "attendee_email": "not-an-email" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    let snapshot = app.store.snapshot().await;
    assert!(snapshot.registrations.is_empty());
    assert!(snapshot.counts_consistent());
}

#[tokio::test]
async fn test_registration_is_published_to_message_bus() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/registrations/messages"))
        .and(body_partial_json(json!({
            "SessionId": 2,
            "SessionTitle": "Event-Driven Architectures",
            "AttendeeEmail": "bob@example.com",
            "Room": "Room A",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::with_options(TestAppOptions {
        messaging: Some(MessagingConfig {
            service_bus: ServiceBusConfig {
                endpoint: server.uri(),
                topic_name: "registrations".to_string(),
                access_key: String::new(),
            },
            ..MessagingConfig::default()
        }),
        ..TestAppOptions::default()
    })
    .await;

    let response = app
        .request(
            "POST",
            "/api/sessions/2/registrations",
            Some(json!({ "attendee_name": "Bob", "attendee_email": "bob@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    assert!(app.dispatcher.drain(Duration::from_secs(10)).await);
    assert_eq!(
        app.telemetry.event_names(),
        vec!["ServiceBusMessagePublished"]
    );
}

#[tokio::test]
async fn test_registration_succeeds_when_channel_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = TestApp::with_options(TestAppOptions {
        messaging: Some(MessagingConfig {
            service_bus: ServiceBusConfig {
                endpoint: server.uri(),
                topic_name: "registrations".to_string(),
                access_key: String::new(),
            },
            ..MessagingConfig::default()
        }),
        ..TestAppOptions::default()
    })
    .await;

    let response = app
        .request(
            "POST",
            "/api/sessions/1/registrations",
            Some(json!({ "attendee_name": "Carol", "attendee_email": "carol@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    assert!(app.dispatcher.drain(Duration::from_secs(10)).await);
    assert_eq!(
        app.telemetry.event_names(),
        vec!["ServiceBusMessagePublishFailed"]
    );
    assert_eq!(app.store.list_registrations().await.len(), 1);
}
