//! HTTP integration tests for session bootstrap and role switching.
//!
//! Run with: `cargo test --test session_http_test`

mod helpers;

use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use hl_admin::dashboard::seed::member_id;
use serde_json::json;

use helpers::{body_to_json, TestApp};

#[tokio::test]
async fn test_unknown_role_falls_back_to_admin() {
    let app = TestApp::new();
    let req = TestApp::request(Method::POST, "/api/session")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "role": "SUPERUSER" }).to_string()))
        .unwrap();
    let resp = app.oneshot(req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = body_to_json(resp).await;
    assert_eq!(body["role"], "ADMIN");
    assert_eq!(body["role_label"], "Admin");
    assert!(body["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p != "manage_roles"));
}

#[tokio::test]
async fn test_session_without_body_uses_default_role() {
    let app = TestApp::new();
    let req = TestApp::request(Method::POST, "/api/session")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_to_json(resp).await["role"], "ADMIN");
}

#[tokio::test]
async fn test_role_cookie_is_resumed() {
    let app = TestApp::new();
    let req = TestApp::request(Method::POST, "/api/session")
        .header(header::COOKIE, "hl_admin_role=MODERATOR")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let cookies: Vec<String> = resp
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("hl_admin_session=")));
    assert!(cookies.iter().any(|c| c.starts_with("hl_admin_role=MODERATOR")));

    assert_eq!(body_to_json(resp).await["role"], "MODERATOR");
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let app = TestApp::new();
    let token = app.sign_in("SUPPORT").await;

    let req = TestApp::request(Method::GET, "/api/session")
        .header(header::COOKIE, format!("hl_admin_session={token}"))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_to_json(resp).await["role"], "SUPPORT");
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = TestApp::new();
    for uri in ["/api/session", "/api/dashboard", "/api/users", "/api/audit-log"] {
        let req = TestApp::request(Method::GET, uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body_to_json(resp).await["error"], "unauthenticated");
    }

    let bogus = app.get("00000000-0000-0000-0000-000000000000", "/api/dashboard").await;
    assert_eq!(bogus.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_switch_takes_effect_on_next_request() {
    let app = TestApp::new();
    let token = app.sign_in("AD_MANAGER").await;
    let before = body_to_json(app.get(&token, "/api/session").await).await;

    assert_eq!(app.get(&token, "/api/users").await.status(), StatusCode::FORBIDDEN);

    let resp = app
        .send(
            Method::PUT,
            &token,
            "/api/session/role",
            Some(json!({ "role": "MODERATOR" })),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let after = body_to_json(resp).await;
    assert_eq!(after["role"], "MODERATOR");
    assert_eq!(after["actor"]["id"], before["actor"]["id"]);

    assert_eq!(app.get(&token, "/api/users").await.status(), StatusCode::OK);
    assert_eq!(app.get(&token, "/api/ads").await.status(), StatusCode::FORBIDDEN);

    let ban = app
        .send(
            Method::POST,
            &token,
            &format!("/api/users/{}/ban", member_id(12)),
            None,
        )
        .await;
    assert_eq!(ban.status(), StatusCode::OK);
    let record = &app.wait_for_deliveries(1).await[0];
    assert_eq!(record.actor.role.as_str(), "MODERATOR");
}

#[tokio::test]
async fn test_switch_to_unknown_role_uses_default() {
    let app = TestApp::new();
    let token = app.sign_in("OWNER").await;
    let resp = app
        .send(
            Method::PUT,
            &token,
            "/api/session/role",
            Some(json!({ "role": "root" })),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_to_json(resp).await["role"], "ADMIN");
}

#[tokio::test]
async fn test_sign_out() {
    let app = TestApp::new();
    let token = app.sign_in("ADMIN").await;
    assert_eq!(app.state.sessions.len(), 1);

    let resp = app.send(Method::DELETE, &token, "/api/session", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(app.state.sessions.is_empty());
    assert_eq!(app.get(&token, "/api/session").await.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let req = TestApp::request(Method::GET, "/health").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_to_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["audit_transport"], "recording");
}
