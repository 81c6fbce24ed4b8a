//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use rockguard_alert::AlertFeed;
use rockguard_api::AppState;
use rockguard_core::config::AppConfig;
use rockguard_mail::MemoryMailTransport;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for inspecting the advisory directly
    pub state: AppState,
    /// Records every email the app sends
    pub mail: Arc<MemoryMailTransport>,
}

impl TestApp {
    /// App with default configuration, the seeded feed, and a working mailbox
    pub fn new() -> Self {
        Self::with_transport(MemoryMailTransport::new())
    }

    /// App whose provider rejects every message
    pub fn failing(reason: &str) -> Self {
        Self::with_transport(MemoryMailTransport::failing(reason))
    }

    fn with_transport(transport: MemoryMailTransport) -> Self {
        let mut config = AppConfig::default();
        config.mail.provider = "memory".to_string();

        let mail = Arc::new(transport);
        let state = AppState::new(config, mail.clone(), AlertFeed::seeded())
            .expect("Failed to build app state");
        let router = rockguard_api::build_router(state.clone());

        Self {
            router,
            state,
            mail,
        }
    }

    /// Send a request with an optional JSON body
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        let body = match body {
            Some(b) => {
                req = req.header("Content-Type", "application/json");
                Body::from(serde_json::to_string(&b).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };

        self.send(req.body(body).expect("Failed to build request"))
            .await
    }

    /// Send a request whose body is used verbatim
    pub async fn request_raw(&self, method: &str, path: &str, body: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A complete, valid `send-evacuation-alert` body
pub fn alert_body(emails: Value) -> Value {
    serde_json::json!({
        "emails": emails,
        "location": { "city": "Shimla", "state": "Himachal Pradesh" },
        "alertDetails": {
            "confidence": "94.7%",
            "threat": "ROCKFALL - GRADE IV",
            "affectedZones": "North Wall, Crest Zone",
            "personnelAtRisk": "12 WORKERS"
        }
    })
}
