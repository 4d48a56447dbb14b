//! Router-level tests for the request paths that never touch the store.
//!
//! Missing and mismatched tokens, and incomplete intake bodies, are all
//! rejected before any database access, so these tests run against a router
//! whose pool points at nothing.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use concierge_api::{create_app_router, AppConfig, AppState, DbClient, DbConfig};
use concierge_core::TokenVerifier;

const TEST_SECRET: &str = "test-secret";

// HMAC-SHA256(key = "test-secret", message = "test-string"), hex.
const EXPECTED_TAG: &str = "c90e44d774cc928ec76478cf3406b8cc88ee5723b6256f8736085630202d86da";

fn test_app_with_config(config: &AppConfig) -> Router {
    let db = DbClient::from_config(&DbConfig::default()).expect("pool must build offline");
    let state = AppState::new(db, TokenVerifier::new(TEST_SECRET));
    create_app_router(state, config)
}

fn test_app() -> Router {
    test_app_with_config(&AppConfig::default())
}

fn post_json(uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> JsonValue {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// VERIFICATION ENDPOINT
// ============================================================================

#[tokio::test]
async fn verify_without_token_field_is_rejected() {
    let response = test_app()
        .oneshot(post_json("/api/verify-hmac", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "c_number is required" })
    );
}

#[tokio::test]
async fn verify_with_empty_token_is_rejected() {
    let response = test_app()
        .oneshot(post_json("/api/verify-hmac", json!({ "c_number": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "c_number is required" })
    );
}

#[tokio::test]
async fn verify_with_wrong_tag_is_unauthorized() {
    // Well-formed hex, wrong value: flip the last character of the real tag.
    let mut wrong = EXPECTED_TAG.to_string();
    wrong.pop();
    wrong.push('0');
    assert_ne!(wrong, EXPECTED_TAG);

    let response = test_app()
        .oneshot(post_json("/api/verify-hmac", json!({ "c_number": wrong })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({ "error": "Invalid HMAC" }));
}

#[tokio::test]
async fn verify_with_uppercase_tag_is_unauthorized() {
    let response = test_app()
        .oneshot(post_json(
            "/api/verify-hmac",
            json!({ "c_number": EXPECTED_TAG.to_uppercase() }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// ASSISTANCE ENDPOINT
// ============================================================================

#[tokio::test]
async fn intake_with_missing_fields_is_rejected_before_any_insert() {
    let incomplete_bodies = [
        json!({}),
        json!({ "name": "Alice" }),
        json!({ "name": "Alice", "email": "a@example.com" }),
        json!({ "name": "Alice", "email": "a@example.com", "issue_description": "" }),
        json!({ "name": "  ", "email": "a@example.com", "issue_description": "broken login" }),
    ];

    for body in incomplete_bodies {
        let response = test_app()
            .oneshot(post_json("/api/assistance-request", body.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Missing required fields: name, email, issue_description" }),
            "{body}"
        );
    }
}

// ============================================================================
// HEALTH AND FALLBACK
// ============================================================================

#[tokio::test]
async fn health_ping_answers_pong() {
    let response = test_app()
        .oneshot(Request::get("/health/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"pong");
}

#[tokio::test]
async fn health_live_reports_healthy() {
    let response = test_app()
        .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn unmatched_routes_serve_the_entry_document() {
    let static_dir = std::env::temp_dir().join(format!("concierge-spa-{}", std::process::id()));
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(
        static_dir.join("index.html"),
        "<!doctype html><title>Concierge</title>",
    )
    .unwrap();

    let config = AppConfig {
        static_dir: static_dir.clone(),
        ..AppConfig::default()
    };
    let app = test_app_with_config(&config);

    for uri in ["/", "/some/deep/client/route", "/missing-asset.js"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(
            String::from_utf8_lossy(&bytes).contains("Concierge"),
            "{uri}"
        );
    }
}

#[cfg(feature = "openapi")]
#[tokio::test]
async fn openapi_document_is_served() {
    let response = test_app()
        .oneshot(Request::get("/openapi.json").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/api/verify-hmac"].is_object());
}
