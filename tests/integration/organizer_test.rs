//! Integration tests for organizer routes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{ORGANIZER_KEY, TestApp, TestAppOptions};

fn new_session_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "speaker": "Priya Patel",
        "start_time": "2026-11-16T09:00:00Z",
        "end_time": "2026-11-16T10:00:00Z",
        "room": "Room B",
        "description": "Secrets without friction",
        "capacity": 80,
    })
}

#[tokio::test]
async fn test_create_session_allocates_next_id() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/organizer/sessions",
            Some(new_session_body("Secrets Management")),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.data()["id"], 3);
    assert_eq!(response.data()["current_registrations"], 0);
}

#[tokio::test]
async fn test_create_with_reversed_schedule_is_rejected() {
    let app = TestApp::new().await;
    let mut body = new_session_body("Backwards");
    body["end_time"] = json!("2026-11-16T08:00:00Z");

    let response = app
        .request("POST", "/api/organizer/sessions", Some(body), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.list_sessions().await.len(), 2);
}

#[tokio::test]
async fn test_update_keeps_registration_count() {
    let app = TestApp::new().await;
    app.request(
        "POST",
        "/api/sessions/2/registrations",
        Some(json!({ "attendee_name": "Alice", "attendee_email": "alice@example.com" })),
        None,
    )
    .await;

    let mut body = new_session_body("Event-Driven Architectures, Revisited");
    body["current_registrations"] = json!(999);
    let response = app
        .request("PUT", "/api/organizer/sessions/2", Some(body), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["id"], 2);
    assert_eq!(response.data()["title"], "Event-Driven Architectures, Revisited");
    assert_eq!(response.data()["current_registrations"], 1);
}

#[tokio::test]
async fn test_update_missing_session_is_not_found() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "PUT",
            "/api/organizer/sessions/77",
            Some(new_session_body("Ghost")),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_cascades_registrations() {
    let app = TestApp::new().await;
    for email in ["a@example.com", "b@example.com"] {
        app.request(
            "POST",
            "/api/sessions/1/registrations",
            Some(json!({ "attendee_name": "Attendee", "attendee_email": email })),
            None,
        )
        .await;
    }

    let response = app
        .request("DELETE", "/api/organizer/sessions/1", None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let listed = app
        .request("GET", "/api/organizer/registrations", None, None)
        .await;
    assert_eq!(listed.data().as_array().map(Vec::len), Some(0));

    let again = app
        .request("DELETE", "/api/organizer/sessions/1", None, None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let snapshot = app.store.snapshot().await;
    assert!(snapshot.no_orphans());
}

#[tokio::test]
async fn test_list_registrations_filtered_by_session() {
    let app = TestApp::new().await;
    for (session, email) in [(1, "a@example.com"), (2, "b@example.com"), (1, "c@example.com")] {
        app.request(
            "POST",
            &format!("/api/sessions/{session}/registrations"),
            Some(json!({ "attendee_name": "Attendee", "attendee_email": email })),
            None,
        )
        .await;
    }

    let all = app
        .request("GET", "/api/organizer/registrations", None, None)
        .await;
    let all = all.data().as_array().expect("array").clone();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0]["attendee_email"], "c@example.com");

    let filtered = app
        .request("GET", "/api/organizer/registrations?session_id=1", None, None)
        .await;
    assert_eq!(filtered.data().as_array().map(Vec::len), Some(2));

    let missing = app
        .request("GET", "/api/organizer/registrations?session_id=9", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_gated_routes_require_key() {
    let app = TestApp::with_options(TestAppOptions {
        gated: true,
        ..TestAppOptions::default()
    })
    .await;

    let missing = app
        .request(
            "POST",
            "/api/organizer/sessions",
            Some(new_session_body("Locked")),
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);

    let wrong = app
        .request(
            "POST",
            "/api/organizer/sessions",
            Some(new_session_body("Locked")),
            Some("guess"),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);

    let ok = app
        .request(
            "POST",
            "/api/organizer/sessions",
            Some(new_session_body("Unlocked")),
            Some(ORGANIZER_KEY),
        )
        .await;
    assert_eq!(ok.status, StatusCode::CREATED);

    // Public routes stay open.
    let public = app.request("GET", "/api/sessions", None, None).await;
    assert_eq!(public.status, StatusCode::OK);
}

#[tokio::test]
async fn test_upload_without_storage_is_unavailable() {
    let app = TestApp::new().await;

    let response = app
        .upload("/api/organizer/sessions/1/slides", &[("deck.pdf", &b"%PDF"[..])])
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "CONFIGURATION_ERROR");
}

#[tokio::test]
async fn test_upload_appends_and_serves_slides() {
    let app = TestApp::with_options(TestAppOptions {
        slide_storage: true,
        ..TestAppOptions::default()
    })
    .await;

    let response = app
        .upload(
            "/api/organizer/sessions/1/slides",
            &[("deck.pdf", &b"%PDF-1.7"[..]), ("empty.pdf", &b""[..]), ("notes.pptx", &b"PK"[..])],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let urls = response.data()["slide_urls"]
        .as_array()
        .expect("array")
        .clone();
    assert_eq!(urls.len(), 2);
    let first = urls[0].as_str().expect("string");
    assert!(first.starts_with("http://localhost:8080/slides/slides/sessions/1/"));
    assert!(first.ends_with(".pdf"));

    let served_path = first.trim_start_matches("http://localhost:8080");
    let served = app.request("GET", served_path, None, None).await;
    assert_eq!(served.status, StatusCode::OK);
}

#[tokio::test]
async fn test_upload_for_missing_session_is_not_found() {
    let app = TestApp::with_options(TestAppOptions {
        slide_storage: true,
        ..TestAppOptions::default()
    })
    .await;

    let response = app
        .upload("/api/organizer/sessions/9/slides", &[("deck.pdf", &b"%PDF"[..])])
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_after_upload_keeps_slides() {
    let app = TestApp::with_options(TestAppOptions {
        slide_storage: true,
        ..TestAppOptions::default()
    })
    .await;

    let uploaded = app
        .upload("/api/organizer/sessions/2/slides", &[("deck.pdf", &b"%PDF"[..])])
        .await;
    assert_eq!(uploaded.status, StatusCode::OK);
    let slides = uploaded.data()["slide_urls"].clone();

    let edited = app
        .request(
            "PUT",
            "/api/organizer/sessions/2",
            Some(new_session_body("Event-Driven Architectures, Revisited")),
            None,
        )
        .await;

    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.data()["slide_urls"], slides);
    assert_eq!(edited.data()["slide_urls"].as_array().map(Vec::len), Some(1));
}
