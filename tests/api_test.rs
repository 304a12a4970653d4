//! Integration tests for API endpoints, driven through the test harness.

use axum::http::StatusCode;
use serde_json::{json, Value};
use tokio_test::assert_ok;

use ajali_api::config::{MapEnv, Profile, Settings, ENV_JWT_SECRET_KEY};
use ajali_api::services::TokenResponse;
use ajali_api::testing::{AuthHeaders, TestSession, IN_MEMORY_DATABASE_URL};

fn registration(email: &str, username: &str) -> Value {
    json!({
        "email": email,
        "username": username,
        "full_name": "Jane Wanjiku",
        "password": "SecurePass123",
    })
}

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let session = assert_ok!(TestSession::in_memory().await);
    let client = session.client();

    let response = assert_ok!(
        client
            .post_json("/api/auth/register", &registration("jane@example.com", "jane"), None)
            .await
    );

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: TokenResponse = assert_ok!(response.json());
    assert!(!body.access_token.is_empty());
    assert_eq!(body.token_type, "Bearer");
    assert_eq!(body.expires_in, 300);
    assert_eq!(body.user.email, "jane@example.com");
    assert_eq!(body.user.role, "user");

    let headers = assert_ok!(session.login(&client, "jane@example.com", "SecurePass123").await);
    let me = assert_ok!(client.get("/api/auth/me", Some(&headers)).await);
    assert_eq!(me.status(), StatusCode::OK);

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let session = assert_ok!(TestSession::in_memory().await);
    let client = session.client();

    let first = assert_ok!(
        client
            .post_json("/api/auth/register", &registration("jane@example.com", "jane"), None)
            .await
    );
    assert_eq!(first.status(), StatusCode::CREATED);

    let same_username = assert_ok!(
        client
            .post_json("/api/auth/register", &registration("other@example.com", "jane"), None)
            .await
    );
    assert_eq!(same_username.status(), StatusCode::CONFLICT);

    let body: Value = assert_ok!(same_username.json());
    assert_eq!(body["error"]["code"], "CONFLICT");

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_register_validates_payload() {
    let session = assert_ok!(TestSession::in_memory().await);
    let client = session.client();

    let response = assert_ok!(
        client
            .post_json(
                "/api/auth/register",
                &json!({
                    "email": "not-an-email",
                    "username": "jw",
                    "full_name": "Jane Wanjiku",
                    "password": "short",
                }),
                None,
            )
            .await
    );

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = assert_ok!(response.json());
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    let message = body["error"]["message"].as_str().unwrap_or_default();
    assert!(message.contains("Invalid email format"));
    assert!(message.contains("Password must be at least 8 characters"));

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_me_requires_token() {
    let session = assert_ok!(TestSession::in_memory().await);
    let client = session.client();

    let response = assert_ok!(client.get("/api/auth/me", None).await);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = assert_ok!(response.json());
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_me_rejects_forged_token() {
    let session = assert_ok!(TestSession::in_memory().await);
    let client = session.client();
    let mut case = assert_ok!(session.begin_test().await);
    assert_ok!(case.test_user().await);

    // Same account, different signing key.
    let foreign = assert_ok!(
        TestSession::builder()
            .settings(assert_ok!(Settings::resolve(
                Profile::Testing,
                &MapEnv::new().with(ENV_JWT_SECRET_KEY, "another-signing-key"),
            )))
            .database_url(IN_MEMORY_DATABASE_URL)
            .build()
            .await
    );
    let mut foreign_case = assert_ok!(foreign.begin_test().await);
    let forged = assert_ok!(foreign_case.auth_headers().await);

    let response = assert_ok!(client.get("/api/auth/me", Some(&forged)).await);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = assert_ok!(response.json());
    assert_eq!(body["error"]["code"], "AUTH_ERROR");

    assert_ok!(foreign_case.finish().await);
    assert_ok!(foreign.teardown().await);
    assert_ok!(case.finish().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_me_rejects_wrong_scheme() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut case = assert_ok!(session.begin_test().await);
    let headers = assert_ok!(case.auth_headers().await);

    let mut settings = session.settings().clone();
    settings.jwt_header_type = "Token".to_string();
    let wrong_scheme = assert_ok!(AuthHeaders::bearer(&settings, headers.token()));

    let response = assert_ok!(case.client().get("/api/auth/me", Some(&wrong_scheme)).await);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_ok!(case.finish().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_health_reports_database() {
    let session = assert_ok!(TestSession::in_memory().await);

    let response = assert_ok!(session.client().get("/health", None).await);
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = assert_ok!(response.json());
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["profile"], "testing");
    assert_eq!(body["database"]["status"], "healthy");

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_openapi_document_lists_auth_paths() {
    let session = assert_ok!(TestSession::in_memory().await);

    let response = assert_ok!(session.client().get("/api-docs/openapi.json", None).await);
    assert_eq!(response.status(), StatusCode::OK);

    let doc: Value = assert_ok!(response.json());
    assert!(doc["paths"]["/api/auth/login"].is_object());
    assert!(doc["paths"]["/api/auth/register"].is_object());
    assert!(doc["paths"]["/api/auth/me"].is_object());

    assert_ok!(session.teardown().await);
}
