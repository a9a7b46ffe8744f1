//! Integration tests for the public session catalogue.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_sessions_ordered_by_start_with_reset_counts() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/sessions", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let sessions = response.data().as_array().expect("array");
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0]["id"], 1);
    assert_eq!(sessions[1]["id"], 2);
    // Seeded count of 40 is discarded at startup.
    assert_eq!(sessions[0]["current_registrations"], 0);
    assert_eq!(sessions[0]["seats_remaining"], 2);
    assert_eq!(sessions[0]["is_full"], false);
}

#[tokio::test]
async fn test_get_session_by_id() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/sessions/2", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["title"], "Event-Driven Architectures");
    assert_eq!(response.data()["room"], "Room A");
}

#[tokio::test]
async fn test_get_missing_session_is_not_found() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/sessions/99", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/sessions/abc", None, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
