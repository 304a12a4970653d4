//! Session-scoped application fixture and the per-test driver.

use std::sync::Arc;

use axum::Router;
use serde::Deserialize;

use super::{seed_user, AuthHeaders, DbSession, FixtureError, SeedUser, TestClient};
use crate::api::{create_router, AppState};
use crate::config::{Profile, Settings};
use crate::domain::{User, UserRole};
use crate::infra::{Database, TxUserRepository};
use crate::services::Authenticator;

/// In-memory SQLite; sqlx gives every pool parsed from this URL its own database.
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Configures a [`TestSession`].
#[derive(Debug, Default)]
pub struct TestSessionBuilder {
    settings: Option<Settings>,
    database_url: Option<String>,
}

impl TestSessionBuilder {
    /// Use these settings instead of resolving the testing profile.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Point the session at another database.
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Connect, create the schema and build the router.
    ///
    /// If schema creation fails, whatever was created is dropped before the
    /// error is returned.
    pub async fn build(self) -> Result<TestSession, FixtureError> {
        let mut settings = match self.settings {
            Some(settings) => settings,
            None => Settings::load(Profile::Testing)?,
        };
        if let Some(url) = self.database_url {
            settings = settings.with_database_url(url);
        }
        let settings = Arc::new(settings);

        let database = Database::connect(&settings).await?;
        if let Err(err) = database.create_schema().await {
            if let Err(cleanup) = database.drop_schema().await {
                tracing::warn!(error = %cleanup, "Could not drop partial test schema");
            }
            return Err(err.into());
        }

        let router = create_router(AppState::from_settings(database.clone(), settings.clone()));
        tracing::debug!(profile = %settings.profile, "Test session ready");

        Ok(TestSession {
            settings,
            database,
            router,
        })
    }
}

/// Application, schema and connection pool shared by a group of tests.
///
/// Release it with [`teardown`](Self::teardown) once every [`TestCase`] and
/// [`DbSession`] borrowed from it is gone.
pub struct TestSession {
    settings: Arc<Settings>,
    database: Database,
    router: Router,
}

#[derive(Deserialize)]
struct LoginBody {
    access_token: Option<String>,
}

impl TestSession {
    pub fn builder() -> TestSessionBuilder {
        TestSessionBuilder::default()
    }

    /// Session on a private in-memory SQLite database.
    pub async fn in_memory() -> Result<Self, FixtureError> {
        Self::builder()
            .database_url(IN_MEMORY_DATABASE_URL)
            .build()
            .await
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Client on the session pool. Its requests only see committed rows.
    pub fn client(&self) -> TestClient {
        TestClient::new(self.router.clone())
    }

    /// Open a transaction on the session database.
    pub async fn db_session(&self) -> Result<DbSession<'_>, FixtureError> {
        Ok(DbSession::begin(self.database.connection()).await?)
    }

    /// Log in through the HTTP API and build the auth header from the token.
    pub async fn login(
        &self,
        client: &TestClient,
        email: &str,
        password: &str,
    ) -> Result<AuthHeaders, FixtureError> {
        let response = client
            .post_json(
                "/api/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
                None,
            )
            .await?;

        if !response.status().is_success() {
            return Err(FixtureError::Login {
                status: response.status(),
                body: response.text(),
            });
        }

        let token = response
            .json::<LoginBody>()?
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or(FixtureError::MissingToken)?;

        AuthHeaders::bearer(&self.settings, &token)
    }

    /// Start a test with a fresh transaction and a client whose requests
    /// run inside it.
    pub async fn begin_test(&self) -> Result<TestCase<'_>, FixtureError> {
        let db = self.db_session().await?;
        let users = Arc::new(TxUserRepository::new(db.shared()));
        let state = AppState::new(
            Arc::new(Authenticator::new(users, self.settings.clone())),
            Arc::new(self.database.clone()),
            self.settings.clone(),
        );

        Ok(TestCase {
            session: self,
            client: TestClient::new(create_router(state)),
            db,
            user: None,
            admin: None,
            user_headers: None,
            admin_headers: None,
        })
    }

    /// Drop every table and close the pool.
    pub async fn teardown(self) -> Result<(), FixtureError> {
        let TestSession {
            database, router, ..
        } = self;
        drop(router);

        database.drop_schema().await?;
        database.close().await?;
        Ok(())
    }
}

/// Per-test driver bundling a client with a transaction.
///
/// The client's requests share the test's transaction, so rows the test
/// writes are visible to the application before any commit, and
/// [`finish`](Self::finish) discards what the requests wrote too.
///
/// Seeded users and their auth headers are created on first use and reused
/// for the rest of the test.
pub struct TestCase<'s> {
    session: &'s TestSession,
    client: TestClient,
    db: DbSession<'s>,
    user: Option<User>,
    admin: Option<User>,
    user_headers: Option<AuthHeaders>,
    admin_headers: Option<AuthHeaders>,
}

impl<'s> TestCase<'s> {
    pub fn client(&self) -> &TestClient {
        &self.client
    }

    pub fn db(&mut self) -> &mut DbSession<'s> {
        &mut self.db
    }

    /// The seeded `user` account.
    pub async fn test_user(&mut self) -> Result<&User, FixtureError> {
        self.seeded(UserRole::User).await
    }

    /// The seeded `admin` account.
    pub async fn test_admin(&mut self) -> Result<&User, FixtureError> {
        self.seeded(UserRole::Admin).await
    }

    /// Headers for the seeded user, seeding it first if needed.
    pub async fn auth_headers(&mut self) -> Result<AuthHeaders, FixtureError> {
        self.headers(UserRole::User).await
    }

    /// Headers for the seeded admin, seeding it first if needed.
    pub async fn admin_headers(&mut self) -> Result<AuthHeaders, FixtureError> {
        self.headers(UserRole::Admin).await
    }

    /// Roll back anything the test left uncommitted.
    pub async fn finish(self) -> Result<(), FixtureError> {
        Ok(self.db.rollback().await?)
    }

    async fn seeded(&mut self, role: UserRole) -> Result<&User, FixtureError> {
        let slot = match role {
            UserRole::User => &mut self.user,
            UserRole::Admin => &mut self.admin,
        };

        let user = match slot.take() {
            Some(user) => user,
            None => seed_user(&mut self.db, &SeedUser::for_role(role)).await?,
        };
        let user: &User = slot.insert(user);
        Ok(user)
    }

    async fn headers(&mut self, role: UserRole) -> Result<AuthHeaders, FixtureError> {
        let cached = match role {
            UserRole::User => &self.user_headers,
            UserRole::Admin => &self.admin_headers,
        };
        if let Some(headers) = cached {
            return Ok(headers.clone());
        }

        self.seeded(role).await?;
        let seed = SeedUser::for_role(role);
        let headers = self
            .session
            .login(&self.client, &seed.email, &seed.password)
            .await?;

        match role {
            UserRole::User => self.user_headers = Some(headers.clone()),
            UserRole::Admin => self.admin_headers = Some(headers.clone()),
        }
        Ok(headers)
    }
}
