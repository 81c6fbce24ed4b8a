//! Integration tests for the evacuation advisory control surface.

mod helpers;

use std::time::Duration;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test(start_paused = true)]
async fn test_advisory_lifecycle() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/evacuation", None).await;
    assert_eq!(response.body["state"], "closed");

    let response = app.request("POST", "/api/evacuation/open", None).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["state"], "reviewing");
    assert_eq!(response.body["countdownSeconds"], 120);
    assert_eq!(response.body["details"]["location"]["city"], "Shimla");

    let response = app
        .request(
            "POST",
            "/api/evacuation/recipients",
            Some(json!({ "email": "ops@site" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["added"], true);
    assert_eq!(response.body["recipients"], json!(["ops@site"]));

    let response = app
        .request("POST", "/api/evacuation/broadcast/start", None)
        .await;
    assert_eq!(response.body["started"], true);
    assert_eq!(response.body["session"]["state"], "broadcasting");
    assert_eq!(response.body["session"]["sirenActive"], true);

    tokio::time::sleep(Duration::from_millis(20_500)).await;

    let response = app.request("POST", "/api/evacuation/mute", None).await;
    assert_eq!(response.body["muted"], true);
    assert_eq!(response.body["session"]["state"], "muted");
    assert_eq!(response.body["session"]["sirenActive"], false);
    assert_eq!(response.body["session"]["emailsSentCount"], 2);
    assert_eq!(response.body["session"]["countdownSeconds"], 100);

    let response = app
        .request("POST", "/api/evacuation/broadcast/stop", None)
        .await;
    assert_eq!(response.body["stopped"], true);
    assert_eq!(response.body["session"]["state"], "reviewing");

    let response = app.request("POST", "/api/evacuation/close", None).await;
    assert_eq!(response.body["closed"], true);
    assert_eq!(response.body["session"]["state"], "closed");

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(app.mail.sent_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_open_twice_conflicts() {
    let app = TestApp::new();

    app.request("POST", "/api/evacuation/open", None).await;
    let response = app.request("POST", "/api/evacuation/open", None).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(response.body["error"].as_str().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_open_with_overrides() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/evacuation/open",
            Some(json!({ "city": "Leh", "state": "Ladakh" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["details"]["location"]["city"], "Leh");
    assert_eq!(response.body["details"]["threat"], "ROCKFALL - GRADE IV");
}

#[tokio::test(start_paused = true)]
async fn test_recipients_require_open_advisory() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/evacuation/recipients",
            Some(json!({ "email": "ops@site" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test(start_paused = true)]
async fn test_recipient_add_and_remove_report_changes() {
    let app = TestApp::new();
    app.request("POST", "/api/evacuation/open", None).await;

    for (email, expected) in [("a@site", true), ("a@site", false), ("bogus", false), (" b@site ", true)] {
        let response = app
            .request(
                "POST",
                "/api/evacuation/recipients",
                Some(json!({ "email": email })),
            )
            .await;
        assert_eq!(response.body["added"], expected, "adding {email:?}");
    }

    let response = app
        .request("DELETE", "/api/evacuation/recipients/a@site", None)
        .await;
    assert_eq!(response.body["removed"], true);
    assert_eq!(response.body["recipients"], json!(["b@site"]));

    let response = app
        .request("DELETE", "/api/evacuation/recipients/a@site", None)
        .await;
    assert_eq!(response.body["removed"], false);
}

#[tokio::test(start_paused = true)]
async fn test_start_without_recipients_is_noop() {
    let app = TestApp::new();
    app.request("POST", "/api/evacuation/open", None).await;

    let response = app
        .request("POST", "/api/evacuation/broadcast/start", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["started"], false);
    assert_eq!(response.body["session"]["state"], "reviewing");

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(app.mail.attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_dispatches_are_reported_not_counted() {
    let app = TestApp::failing("provider down");
    app.request("POST", "/api/evacuation/open", None).await;
    app.request(
        "POST",
        "/api/evacuation/recipients",
        Some(json!({ "email": "ops@site" })),
    )
    .await;
    app.request("POST", "/api/evacuation/broadcast/start", None)
        .await;

    tokio::time::sleep(Duration::from_secs(20)).await;

    let response = app.request("GET", "/api/evacuation", None).await;
    assert_eq!(response.body["state"], "broadcasting");
    assert_eq!(response.body["emailsSentCount"], 0);
    assert_eq!(response.body["lastResult"]["status"], "failed");
    assert_eq!(response.body["lastResult"]["reason"], "provider down");
    assert_eq!(app.mail.attempts(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_bodies_use_error_envelope() {
    let app = TestApp::new();

    let response = app.request_raw("POST", "/api/evacuation/open", "{ bad").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().is_some(), "{}", response.body);
    assert_eq!(response.body.as_object().map(|o| o.len()), Some(1));

    app.request("POST", "/api/evacuation/open", None).await;
    let response = app
        .request_raw("POST", "/api/evacuation/recipients", "{ not json")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().is_some(), "{}", response.body);

    let response = app
        .request("POST", "/api/evacuation/recipients", Some(json!({ "mail": "ops@site" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].as_str().is_some(), "{}", response.body);
}
