//! Integration tests for the one-shot evacuation alert endpoint.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, alert_body};

const PATH: &str = "/api/send-evacuation-alert";

#[tokio::test]
async fn test_send_alert_success() {
    let app = TestApp::new();

    let response = app
        .request("POST", PATH, Some(alert_body(json!(["ops@site", "safety@site"]))))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Alert sent to 2 recipient(s)");
    assert_eq!(response.body["recipients"], 2);
    assert!(
        response.body["timestamp"]
            .as_str()
            .is_some_and(chrono_like),
        "timestamp: {}",
        response.body["timestamp"]
    );

    let sent = app.mail.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, vec!["ops@site", "safety@site"]);
    assert_eq!(
        sent[0].subject,
        "URGENT: EVACUATION ALERT - Shimla, Himachal Pradesh"
    );
    assert!(sent[0].html.contains("EVACUATE IMMEDIATELY"));
    assert!(sent[0].html.contains("94.7%"));
    assert!(sent[0].text.contains("AFFECTED ZONES: North Wall, Crest Zone"));
}

#[tokio::test]
async fn test_empty_emails_is_bad_request() {
    let app = TestApp::new();

    let response = app.request("POST", PATH, Some(json!({ "emails": [] }))).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "error": "No email addresses provided" }));
    assert_eq!(app.mail.attempts(), 0);
}

#[tokio::test]
async fn test_missing_or_non_array_emails_is_bad_request() {
    let app = TestApp::new();

    for body in [json!({}), json!({ "emails": "ops@site" }), json!({ "emails": null })] {
        let response = app.request("POST", PATH, Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "No email addresses provided");
    }
}

#[tokio::test]
async fn test_provider_failure_is_generic_server_error() {
    let app = TestApp::failing("invalid api key");

    let response = app
        .request("POST", PATH, Some(alert_body(json!(["ops@site"]))))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.body,
        json!({ "error": "Failed to send evacuation alert" })
    );
}

#[tokio::test]
async fn test_missing_details_is_server_error() {
    let app = TestApp::new();

    let response = app
        .request("POST", PATH, Some(json!({ "emails": ["ops@site"] })))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Failed to send evacuation alert");
    assert_eq!(app.mail.attempts(), 0);
}

#[tokio::test]
async fn test_invalid_address_is_server_error() {
    let app = TestApp::new();

    let response = app
        .request("POST", PATH, Some(alert_body(json!(["ops@site", "not-an-address"]))))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.mail.attempts(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_server_error() {
    let app = TestApp::new();

    let response = app.request_raw("POST", PATH, "{ not json").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Failed to send evacuation alert");
}

/// `2026-03-14T14:32:08.123Z`
fn chrono_like(timestamp: &str) -> bool {
    timestamp.len() == 24 && timestamp.ends_with('Z') && timestamp.as_bytes()[10] == b'T'
}
