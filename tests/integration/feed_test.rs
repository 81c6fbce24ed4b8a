//! Integration tests for the alert feed and health endpoints.

mod helpers;

use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["mailProvider"], "memory");
}

#[tokio::test]
async fn test_list_seeded_alerts() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/alerts", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let alerts = response.body["alerts"].as_array().expect("alerts array");
    assert_eq!(alerts.len(), 7);
    assert_eq!(alerts[0]["id"], "ALT-001");
    assert_eq!(alerts[0]["type"], "critical");
    assert_eq!(response.body["criticalCount"], 2);
    assert_eq!(response.body["advisoryActive"], true);
}

#[tokio::test]
async fn test_acknowledging_criticals_clears_advisory() {
    let app = TestApp::new();

    for id in ["ALT-001", "ALT-002"] {
        let response = app
            .request("POST", &format!("/api/alerts/{id}/acknowledge"), None)
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["acknowledged"], true);
    }

    let response = app.request("GET", "/api/alerts", None).await;
    assert_eq!(response.body["criticalCount"], 0);
    assert_eq!(response.body["advisoryActive"], false);
}

#[tokio::test]
async fn test_acknowledge_unknown_alert_is_not_found() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/alerts/ALT-404/acknowledge", None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body["error"].as_str().is_some());
}
