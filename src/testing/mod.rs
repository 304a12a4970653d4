//! Test bootstrap harness.
//!
//! A [`TestSession`] owns the application, its schema and the connection
//! pool. Each test borrows a [`TestCase`] from it, which bundles an
//! in-process [`TestClient`] with a [`DbSession`] transaction and hands out
//! seeded accounts and their auth headers on demand. The case's client runs
//! inside the case's transaction.
//!
//! Compiled for unit tests and with the `test-utils` feature.
//!
//! ```rust,ignore
//! let session = TestSession::in_memory().await?;
//! let mut case = session.begin_test().await?;
//!
//! let headers = case.auth_headers().await?;
//! let response = case.client().get("/api/auth/me", Some(&headers)).await?;
//! assert_eq!(response.status(), StatusCode::OK);
//!
//! case.finish().await?;
//! session.teardown().await?;
//! ```

mod client;
mod db_session;
mod error;
mod fixtures;
mod session;

pub use client::{AuthHeaders, TestClient, TestResponse};
pub use db_session::DbSession;
pub use error::FixtureError;
pub use fixtures::{seed_user, SeedUser};
pub use session::{TestCase, TestSession, TestSessionBuilder, IN_MEMORY_DATABASE_URL};
