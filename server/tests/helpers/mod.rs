//! Reusable test helpers for HTTP integration tests.
//!
//! Provides `TestApp` for sending requests through the full axum router
//! with a [`RecordingTransport`] standing in for the audit service.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{self, header, Method, Request, Response};
use axum::Router;
use hl_admin::api::{create_router, AppState};
use hl_admin::audit::{AuditLog, AuditRecord, AuditTransport, DeliveryFuture};
use hl_admin::config::Config;
use hl_admin::dashboard::Dashboard;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                                   (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// ============================================================================
// Audit transport
// ============================================================================

/// Audit transport that keeps every delivered record in memory.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    records: Mutex<Vec<AuditRecord>>,
}

impl RecordingTransport {
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().expect("recording transport poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().expect("recording transport poisoned").len()
    }
}

impl AuditTransport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn deliver<'a>(&'a self, record: &'a AuditRecord) -> DeliveryFuture<'a> {
        self.records
            .lock()
            .expect("recording transport poisoned")
            .push(record.clone());
        Box::pin(async { Ok(()) })
    }
}

// ============================================================================
// Test App
// ============================================================================

/// A test application wrapping the full axum router.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub transport: Arc<RecordingTransport>,
}

impl TestApp {
    /// Create a new test app over the built-in mock data.
    pub fn new() -> Self {
        Self::with_config(Config::default_for_test())
    }

    /// Create a test app with a custom config.
    pub fn with_config(config: Config) -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let audit = AuditLog::new(transport.clone(), config.audit.clone());
        let state = AppState::new(config, Dashboard::seeded(audit));
        let router = create_router(state.clone());

        Self {
            router,
            state,
            transport,
        }
    }

    /// Build an HTTP request with the given method and URI.
    pub fn request(method: Method, uri: &str) -> http::request::Builder {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::USER_AGENT, TEST_USER_AGENT)
    }

    /// Send a request through the router via `tower::ServiceExt::oneshot`.
    pub async fn oneshot(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot request failed")
    }

    /// Start a session as `role` and return its bearer token.
    pub async fn sign_in(&self, role: &str) -> String {
        let req = Self::request(Method::POST, "/api/session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::json!({ "role": role }).to_string()))
            .expect("valid request");
        let resp = self.oneshot(req).await;
        assert_eq!(resp.status(), 201, "sign in as {role} failed");
        let body = body_to_json(resp).await;
        body["session_id"]
            .as_str()
            .expect("session_id in response")
            .to_string()
    }

    /// Authenticated GET.
    pub async fn get(&self, token: &str, uri: &str) -> Response<Body> {
        let req = Self::request(Method::GET, uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("valid request");
        self.oneshot(req).await
    }

    /// Authenticated request with an optional JSON body.
    pub async fn send(
        &self,
        method: Method,
        token: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let builder = Self::request(method, uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");
        self.oneshot(req).await
    }

    /// Wait until the audit transport has received `n` records.
    pub async fn wait_for_deliveries(&self, n: usize) -> Vec<AuditRecord> {
        for _ in 0..200 {
            if self.transport.count() >= n {
                return self.transport.records();
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "expected {n} audit deliveries, got {}",
            self.transport.count()
        );
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_to_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        let preview = String::from_utf8_lossy(&bytes);
        panic!("Failed to parse response as JSON: {e}\nBody: {preview}")
    })
}

/// Whether the page JSON lists `action` as an enabled control.
pub fn control_enabled(page: &serde_json::Value, action: &str) -> Option<bool> {
    page["controls"]
        .as_array()?
        .iter()
        .find(|c| c["action"] == action)
        .and_then(|c| c["enabled"].as_bool())
}
