//! Seeded accounts shared by tests.

use crate::domain::{NewUser, Password, User, UserRole};
use crate::infra::UserRepository;

use super::{DbSession, FixtureError};

/// Account the harness can insert on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub role: UserRole,
}

impl SeedUser {
    /// The canonical account for `role`.
    pub fn for_role(role: UserRole) -> Self {
        let (email, username, full_name, password) = match role {
            UserRole::User => ("test@example.com", "testuser", "Test User", "TestPass123"),
            UserRole::Admin => ("admin@example.com", "admin", "Admin User", "AdminPass123"),
        };

        Self {
            email: email.to_string(),
            username: username.to_string(),
            full_name: full_name.to_string(),
            password: password.to_string(),
            role,
        }
    }

    pub fn user() -> Self {
        Self::for_role(UserRole::User)
    }

    pub fn admin() -> Self {
        Self::for_role(UserRole::Admin)
    }
}

/// Insert `seed` with a hashed password and commit, so the application can
/// see it.
///
/// A seed that already exists in the database is returned as stored, which
/// lets several tests share one session.
pub async fn seed_user(db: &mut DbSession<'_>, seed: &SeedUser) -> Result<User, FixtureError> {
    if let Some(existing) = db.users().find_by_email(&seed.email).await? {
        db.commit().await?;
        return Ok(existing);
    }

    let password_hash = Password::new(&seed.password)?.into_string();
    let user = db
        .users()
        .create(NewUser {
            email: seed.email.clone(),
            username: seed.username.clone(),
            full_name: seed.full_name.clone(),
            role: seed.role,
            password_hash,
        })
        .await?;
    db.commit().await?;

    tracing::debug!(user_id = %user.id, role = %user.role, "Seeded test user");
    Ok(user)
}
