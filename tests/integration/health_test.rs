//! Integration tests for the health endpoint.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_counts_and_channels() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["status"], "ok");
    assert_eq!(data["sessions"], 2);
    assert_eq!(data["registrations"], 0);
    assert_eq!(data["slide_storage"], false);
    assert_eq!(data["deliveries_in_flight"], 0);

    let channels = data["channels"].as_array().expect("array");
    assert_eq!(channels.len(), 3);
    assert!(channels.iter().all(|c| c["enabled"] == false));
}
