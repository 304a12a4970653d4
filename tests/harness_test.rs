//! Integration tests for the test bootstrap harness.
//!
//! Every test builds its own session on a private in-memory SQLite
//! database, so they run in parallel without sharing state.

use axum::http::StatusCode;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use ajali_api::config::{Profile, Settings, REPORT_STATUS_PENDING, TESTING_DATABASE_URL};
use ajali_api::domain::{NewUser, Password, UserResponse, UserRole};
use ajali_api::infra::UserRepository;
use ajali_api::infra::repositories::entities::{ReportActiveModel, ReportEntity, UserEntity};
use ajali_api::testing::{
    seed_user, FixtureError, SeedUser, TestSession, IN_MEMORY_DATABASE_URL,
};

#[tokio::test]
async fn test_session_creates_schema() {
    let session = assert_ok!(TestSession::in_memory().await);

    let mut db = assert_ok!(session.db_session().await);
    assert_eq!(assert_ok!(db.users().count().await), 0);
    assert_ok!(db.commit().await);
    assert_ok!(db.rollback().await);

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_session_uses_testing_profile() {
    let session = assert_ok!(TestSession::in_memory().await);

    assert_eq!(session.settings().profile, Profile::Testing);
    assert!(session.settings().testing);
    assert!(!session.settings().debug);
    assert_eq!(session.settings().jwt_expires_in_secs(), 300);
    assert_eq!(session.settings().database_url, IN_MEMORY_DATABASE_URL);

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_seeded_user_has_hashed_password() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut db = assert_ok!(session.db_session().await);

    let user = assert_ok!(seed_user(&mut db, &SeedUser::user()).await);

    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.username, "testuser");
    assert_eq!(user.full_name, "Test User");
    assert_eq!(user.role, UserRole::User);
    assert_ne!(user.password_hash, "TestPass123");
    assert!(Password::from_hash(user.password_hash.clone()).verify("TestPass123"));

    assert_ok!(db.rollback().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_seeding_twice_returns_the_stored_user() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut db = assert_ok!(session.db_session().await);

    let first = assert_ok!(seed_user(&mut db, &SeedUser::admin()).await);
    let second = assert_ok!(seed_user(&mut db, &SeedUser::admin()).await);

    assert_eq!(first.id, second.id);
    assert_eq!(assert_ok!(db.users().count().await), 1);

    assert_ok!(db.rollback().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_login_returns_bearer_headers() {
    let session = assert_ok!(TestSession::in_memory().await);
    let client = session.client();
    let mut db = assert_ok!(session.db_session().await);
    assert_ok!(seed_user(&mut db, &SeedUser::user()).await);

    let headers = assert_ok!(session.login(&client, "test@example.com", "TestPass123").await);

    assert!(!headers.token().is_empty());
    assert_eq!(headers.name().as_str(), "authorization");
    assert_eq!(headers.value(), format!("Bearer {}", headers.token()).as_str());

    assert_ok!(db.rollback().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_login_with_wrong_password_fails() {
    let session = assert_ok!(TestSession::in_memory().await);
    let client = session.client();
    let mut db = assert_ok!(session.db_session().await);
    assert_ok!(seed_user(&mut db, &SeedUser::user()).await);

    let err = assert_err!(session.login(&client, "test@example.com", "WrongPass999").await);
    match err {
        FixtureError::Login { status, body } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(body.contains("INVALID_CREDENTIALS"));
        }
        other => panic!("expected login failure, got {other:?}"),
    }

    assert_ok!(db.rollback().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_login_for_unknown_user_fails() {
    let session = assert_ok!(TestSession::in_memory().await);
    let client = session.client();

    let err = assert_err!(session.login(&client, "ghost@example.com", "TestPass123").await);
    assert!(matches!(
        err,
        FixtureError::Login {
            status: StatusCode::UNAUTHORIZED,
            ..
        }
    ));

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_case_auth_headers_reach_protected_route() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut case = assert_ok!(session.begin_test().await);

    let headers = assert_ok!(case.auth_headers().await);
    let response = assert_ok!(case.client().get("/api/auth/me", Some(&headers)).await);

    assert_eq!(response.status(), StatusCode::OK);
    let me: UserResponse = assert_ok!(response.json());
    assert_eq!(me.email, "test@example.com");
    assert_eq!(me.role, "user");
    assert_eq!(me.id, assert_ok!(case.test_user().await).id);

    assert_ok!(case.finish().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_case_admin_headers_carry_admin_role() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut case = assert_ok!(session.begin_test().await);

    let admin = assert_ok!(case.test_admin().await).clone();
    assert!(admin.is_admin());
    assert_eq!(admin.email, "admin@example.com");

    let headers = assert_ok!(case.admin_headers().await);
    let response = assert_ok!(case.client().get("/api/auth/me", Some(&headers)).await);
    let me: UserResponse = assert_ok!(response.json());

    assert_eq!(me.id, admin.id);
    assert_eq!(me.role, "admin");

    assert_ok!(case.finish().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_case_caches_headers() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut case = assert_ok!(session.begin_test().await);

    let first = assert_ok!(case.auth_headers().await);
    let second = assert_ok!(case.auth_headers().await);
    assert_eq!(first, second);

    let admin = assert_ok!(case.admin_headers().await);
    assert_ne!(first.token(), admin.token());

    assert_ok!(case.finish().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_session_outlives_several_cases() {
    let session = assert_ok!(TestSession::in_memory().await);

    for _ in 0..2 {
        let mut case = assert_ok!(session.begin_test().await);
        let headers = assert_ok!(case.auth_headers().await);
        let response = assert_ok!(case.client().get("/api/auth/me", Some(&headers)).await);
        assert_eq!(response.status(), StatusCode::OK);
        assert_ok!(case.finish().await);
    }

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_rollback_discards_uncommitted_work() {
    let session = assert_ok!(TestSession::in_memory().await);

    let mut case = assert_ok!(session.begin_test().await);
    let password_hash = assert_ok!(Password::new("Temporary123")).into_string();
    assert_ok!(
        case.db()
            .users()
            .create(NewUser {
                email: "temp@example.com".to_string(),
                username: "temp".to_string(),
                full_name: "Temp User".to_string(),
                role: UserRole::User,
                password_hash,
            })
            .await
    );
    assert_eq!(assert_ok!(case.db().users().count().await), 1);
    assert_ok!(case.finish().await);

    let db = assert_ok!(session.db_session().await);
    assert_eq!(assert_ok!(db.users().count().await), 0);
    assert_ok!(db.rollback().await);

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_register_after_reading_in_the_case_transaction() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut case = assert_ok!(session.begin_test().await);

    assert_ok!(case.test_user().await);
    assert_eq!(assert_ok!(case.db().users().count().await), 1);

    let response = assert_ok!(
        case.client()
            .post_json(
                "/api/auth/register",
                &serde_json::json!({
                    "email": "new@example.com",
                    "username": "newcomer",
                    "full_name": "New Comer",
                    "password": "NewcomerPass1"
                }),
                None,
            )
            .await
    );
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(assert_ok!(case.db().users().count().await), 2);
    assert_ok!(case.finish().await);

    // The seeded user was committed; the registration was not.
    let db = assert_ok!(session.db_session().await);
    assert_eq!(assert_ok!(db.users().count().await), 1);
    assert_ok!(db.rollback().await);

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_auth_headers_after_uncommitted_insert() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut case = assert_ok!(session.begin_test().await);

    let password_hash = assert_ok!(Password::new("Pending123")).into_string();
    assert_ok!(
        case.db()
            .users()
            .create(NewUser {
                email: "pending@example.com".to_string(),
                username: "pending".to_string(),
                full_name: "Pending User".to_string(),
                role: UserRole::User,
                password_hash,
            })
            .await
    );

    let headers = assert_ok!(case.auth_headers().await);
    let response = assert_ok!(case.client().get("/api/auth/me", Some(&headers)).await);
    assert_eq!(response.status(), StatusCode::OK);

    assert_ok!(case.finish().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_case_client_sees_uncommitted_rows() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut case = assert_ok!(session.begin_test().await);

    let password_hash = assert_ok!(Password::new("Uncommitted1")).into_string();
    assert_ok!(
        case.db()
            .users()
            .create(NewUser {
                email: "draft@example.com".to_string(),
                username: "draft".to_string(),
                full_name: "Draft User".to_string(),
                role: UserRole::User,
                password_hash,
            })
            .await
    );

    let headers = assert_ok!(
        session
            .login(case.client(), "draft@example.com", "Uncommitted1")
            .await
    );
    assert!(!headers.token().is_empty());

    assert_ok!(case.finish().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_reports_table_accepts_rows_for_seeded_user() {
    let session = assert_ok!(TestSession::in_memory().await);
    let mut db = assert_ok!(session.db_session().await);
    let user = assert_ok!(seed_user(&mut db, &SeedUser::user()).await);

    let now = Utc::now();
    let report = ReportActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        title: Set("Flooded road".to_string()),
        description: Set("Water over the bridge on Ngong Road".to_string()),
        incident_type: Set("flood".to_string()),
        status: Set(REPORT_STATUS_PENDING.to_string()),
        latitude: Set(Some(-1.3)),
        longitude: Set(Some(36.8)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let txn = assert_ok!(db.transaction().await);
    let stored = assert_ok!(report.insert(&*txn).await);

    assert_eq!(stored.user_id, user.id);
    assert_eq!(stored.status, "pending");
    assert_eq!(assert_ok!(ReportEntity::find().count(&*txn).await), 1);
    drop(txn);

    assert_ok!(db.rollback().await);
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_teardown_drops_schema() {
    let session = assert_ok!(TestSession::in_memory().await);
    let database = session.database().clone();

    assert_ok!(UserEntity::find().count(database.connection()).await);
    assert_ok!(database.drop_schema().await);
    assert_err!(UserEntity::find().count(database.connection()).await);

    // Dropping is idempotent, so teardown still succeeds.
    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_builder_accepts_explicit_settings() {
    let settings = assert_ok!(Settings::load(Profile::Testing));
    assert_eq!(settings.database_url, TESTING_DATABASE_URL);

    let session = assert_ok!(
        TestSession::builder()
            .settings(settings)
            .database_url(IN_MEMORY_DATABASE_URL)
            .build()
            .await
    );
    assert_eq!(session.settings().database_url, IN_MEMORY_DATABASE_URL);

    assert_ok!(session.teardown().await);
}

#[tokio::test]
async fn test_builder_reports_unreachable_database() {
    let result = TestSession::builder()
        .database_url("sqlite:///nonexistent-dir/ajali/test.db")
        .build()
        .await;

    assert!(matches!(result, Err(FixtureError::Database(_))));
}

/// Runs against the fixed PostgreSQL test database.
///
/// `cargo test -- --ignored --test-threads=1` with `ajali_test_db` available.
#[tokio::test]
#[ignore]
async fn test_postgres_session_round_trip() {
    let session = assert_ok!(TestSession::builder().build().await);
    assert_eq!(session.settings().database_url, TESTING_DATABASE_URL);

    let mut case = assert_ok!(session.begin_test().await);
    let headers = assert_ok!(case.auth_headers().await);
    let response = assert_ok!(case.client().get("/api/auth/me", Some(&headers)).await);
    assert_eq!(response.status(), StatusCode::OK);
    assert_ok!(case.finish().await);

    assert_ok!(session.teardown().await);
}
