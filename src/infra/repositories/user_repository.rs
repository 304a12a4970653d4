//! User repository implementation.
//!
//! Queries are written once over any [`ConnectionTrait`] so the pooled
//! store and the transaction-bound repository share them.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::infra::db::SharedTransaction;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Check whether the email or username is already taken
    async fn exists(&self, email: &str, username: &str) -> AppResult<bool>;

    /// Persist a new user
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Number of stored users
    async fn count(&self) -> AppResult<u64>;
}

/// Pool-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_by_email(&self.db, email).await
    }

    async fn exists(&self, email: &str, username: &str) -> AppResult<bool> {
        exists(&self.db, email, username).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        create(&self.db, user).await
    }

    async fn count(&self) -> AppResult<u64> {
        count(&self.db).await
    }
}

/// User repository running inside a [`SharedTransaction`].
///
/// Writes become visible to other connections only once the transaction commits.
#[derive(Clone)]
pub struct TxUserRepository {
    txn: SharedTransaction,
}

impl TxUserRepository {
    pub fn new(txn: SharedTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl UserRepository for TxUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let txn = self.txn.read().await?;
        find_by_id(&*txn, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let txn = self.txn.read().await?;
        find_by_email(&*txn, email).await
    }

    async fn exists(&self, email: &str, username: &str) -> AppResult<bool> {
        let txn = self.txn.read().await?;
        exists(&*txn, email, username).await
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        let txn = self.txn.read().await?;
        create(&*txn, user).await
    }

    async fn count(&self) -> AppResult<u64> {
        let txn = self.txn.read().await?;
        count(&*txn).await
    }
}

async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<Option<User>> {
    let result = UserEntity::find_by_id(id)
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

async fn find_by_email<C: ConnectionTrait>(conn: &C, email: &str) -> AppResult<Option<User>> {
    let result = UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(User::from))
}

async fn exists<C: ConnectionTrait>(conn: &C, email: &str, username: &str) -> AppResult<bool> {
    let matches = UserEntity::find()
        .filter(
            Condition::any()
                .add(user::Column::Email.eq(email))
                .add(user::Column::Username.eq(username)),
        )
        .count(conn)
        .await
        .map_err(AppError::from)?;

    Ok(matches > 0)
}

async fn create<C: ConnectionTrait>(conn: &C, user: NewUser) -> AppResult<User> {
    let now = Utc::now();
    let active_model = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(user.email),
        username: Set(user.username),
        full_name: Set(user.full_name),
        role: Set(user.role.to_string()),
        password_hash: Set(user.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let model = active_model.insert(conn).await.map_err(AppError::from)?;
    Ok(User::from(model))
}

async fn count<C: ConnectionTrait>(conn: &C) -> AppResult<u64> {
    UserEntity::find()
        .count(conn)
        .await
        .map_err(AppError::from)
}
