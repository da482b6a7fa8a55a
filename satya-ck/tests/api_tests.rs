//! Integration tests for satya-ck API endpoints
//!
//! Tests cover:
//! - Health endpoint, CORS preflight, listener binding
//! - POST /api/analyze for text, URL, and image submissions
//! - Request validation (blank, unknown kind, malformed JSON)
//! - Identity endpoints: sign-up, sign-in, me, logout
//! - Auth-required behaviour with the anonymous fallback disabled
//! - POST /api/signals

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use satya_ck::{bind_listener, build_router, AppState};
use satya_common::db::init_memory_database;
use satya_common::identity::{IdentityProvider, MockIdentityProvider};
use satya_common::orchestrator::Orchestrator;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: app backed by the mock provider on an in-memory database
async fn setup_app(anonymous_fallback: bool) -> Router {
    let pool = init_memory_database().await.expect("Should open memory db");
    let provider = MockIdentityProvider::new(pool, anonymous_fallback);
    provider.init().await.expect("Should init provider");

    let orchestrator = Orchestrator::new(Arc::new(provider));
    build_router(AppState::new(orchestrator))
}

/// Test helper: JSON request with optional bearer token
fn test_request(method: &str, uri: &str, body: Option<Value>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: POST /api/analyze and return (status, body)
async fn analyze(app: &Router, body: Value, token: Option<&str>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/analyze", Some(body), token))
        .await
        .unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

/// Test helper: sign up and return the session token
async fn sign_up(app: &Router, email: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(test_request(
            "POST",
            "/api/auth/signup",
            Some(json!({"email": email, "password": password})),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = extract_json(response.into_body()).await;
    body["token"].as_str().expect("token").to_string()
}

// =============================================================================
// Health and CORS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(true).await;

    let response = app
        .oneshot(test_request("GET", "/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "satya-ck");
    assert_eq!(body["identity"], "mock");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let app = setup_app(true).await;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/analyze")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "3600");
}

#[tokio::test]
async fn test_bind_listener_reports_assigned_port() {
    let (listener, addr) = bind_listener("127.0.0.1", 0).await.unwrap();
    assert_ne!(addr.port(), 0);
    assert_eq!(listener.local_addr().unwrap(), addr);
}

// =============================================================================
// Analysis
// =============================================================================

#[tokio::test]
async fn test_analyze_covid_cure_claim() {
    let app = setup_app(true).await;

    let (status, body) = analyze(
        &app,
        json!({"type": "text", "data": "Miracle cure for COVID doctors don't want you to know"}),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "text");
    assert_eq!(body["rule"], "covid-cure-claim");
    assert_eq!(body["healthScore"], 8);
    assert_eq!(body["sourceCredibilityScore"], 5);
    assert!(body["overallSummary"].is_string());
    assert!(body.get("imageAnalysis").is_none());
}

#[tokio::test]
async fn test_analyze_url_is_generic() {
    let app = setup_app(true).await;

    let (status, body) = analyze(
        &app,
        json!({"type": "url", "data": "https://shocking-news.example/miracle-cure"}),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "url");
    assert_eq!(body["rule"], "url-generic");
    assert_eq!(body["healthScore"], 68);
    assert_eq!(body["sourceCredibilityScore"], 65);
}

#[tokio::test]
async fn test_analyze_images() {
    let app = setup_app(true).await;

    let (status, body) =
        analyze(&app, json!({"type": "image", "fileName": "modi_breaking.jpg"}), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule"], "fabricated-news-image");
    assert_eq!(body["imageAnalysis"]["hasManipulation"], true);
    assert_eq!(body["imageAnalysis"]["confidence"], 95);

    let (status, body) =
        analyze(&app, json!({"type": "image", "data": "holiday.png"}), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule"], "generic-authentic-image");
    assert_eq!(body["healthScore"], 75);
}

#[tokio::test]
async fn test_analyze_rejects_blank_submission() {
    let app = setup_app(true).await;

    let (status, body) = analyze(&app, json!({"type": "text", "data": "   \n\t"}), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "EMPTY_SUBMISSION");
    assert_eq!(
        body["error"]["message"],
        "Please enter text, a URL, or an image to analyze."
    );
}

#[tokio::test]
async fn test_analyze_rejects_unknown_kind() {
    let app = setup_app(true).await;

    let (status, body) = analyze(&app, json!({"type": "video", "data": "clip.mp4"}), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_SUBMISSION");
}

#[tokio::test]
async fn test_analyze_rejects_malformed_json() {
    let app = setup_app(true).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_analyze_requires_identity_without_fallback() {
    let app = setup_app(false).await;

    let (status, body) = analyze(&app, json!({"type": "text", "data": "hello"}), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTHENTICATION_REQUIRED");
    assert_eq!(
        body["error"]["message"],
        "Mock authentication failed. Please try signing up again."
    );

    let token = sign_up(&app, "reader@example.com", "password1").await;
    let (status, body) =
        analyze(&app, json!({"type": "text", "data": "hello"}), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rule"], "default-reliable");
}

// =============================================================================
// Identity
// =============================================================================

#[tokio::test]
async fn test_sign_up_sign_in_and_me() {
    let app = setup_app(false).await;
    sign_up(&app, "ada@example.com", "password1").await;

    let response = app
        .clone()
        .oneshot(test_request(
            "POST",
            "/api/auth/login",
            Some(json!({"email": "ada@example.com", "password": "password1"})),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let session = extract_json(response.into_body()).await;
    let token = session["token"].as_str().unwrap();
    assert_eq!(session["user"]["email"], "ada@example.com");

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/auth/me", None, Some(token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = extract_json(response.into_body()).await;
    assert_eq!(me["uid"], session["user"]["uid"]);
    assert_eq!(me["emailVerified"], false);
}

#[tokio::test]
async fn test_sign_up_errors() {
    let app = setup_app(false).await;
    sign_up(&app, "ada@example.com", "password1").await;

    let cases = [
        (json!({"email": "ada@example.com", "password": "password2"}), StatusCode::CONFLICT, "EMAIL_IN_USE"),
        (json!({"email": "not-an-email", "password": "password2"}), StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        (json!({"email": "bob@example.com", "password": "123"}), StatusCode::BAD_REQUEST, "WEAK_PASSWORD"),
        (json!({"email": "bob@example.com"}), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
    ];

    for (payload, status, code) in cases {
        let response = app
            .clone()
            .oneshot(test_request("POST", "/api/auth/signup", Some(payload.clone()), None))
            .await
            .unwrap();
        assert_eq!(response.status(), status, "payload: {}", payload);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], code, "payload: {}", payload);
    }
}

#[tokio::test]
async fn test_sign_in_failures_are_unauthorized() {
    let app = setup_app(false).await;
    sign_up(&app, "ada@example.com", "password1").await;

    for (email, code) in [
        ("nobody@example.com", "USER_NOT_FOUND"),
        ("ada@example.com", "WRONG_PASSWORD"),
    ] {
        let response = app
            .clone()
            .oneshot(test_request(
                "POST",
                "/api/auth/login",
                Some(json!({"email": email, "password": "not-it-at-all"})),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = extract_json(response.into_body()).await;
        assert_eq!(body["error"]["code"], code);
    }
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = setup_app(false).await;
    let token = sign_up(&app, "ada@example.com", "password1").await;

    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/auth/logout", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(test_request("POST", "/api/auth/logout", None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(test_request("GET", "/api/auth/me", None, Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Signals
// =============================================================================

#[tokio::test]
async fn test_signals_report() {
    let app = setup_app(true).await;

    let response = app
        .clone()
        .oneshot(test_request(
            "POST",
            "/api/signals",
            Some(json!({"text": "According to published research, the data shows a modest effect."})),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert!(body["healthScore"].is_u64());
    assert!(body["analysisMetadata"]["indicators"]["factual"].as_u64().unwrap() >= 3);
    assert!(body["textAnalysis"]["wordCount"].as_u64().unwrap() > 0);

    let response = app
        .oneshot(test_request("POST", "/api/signals", Some(json!({"text": ""})), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
