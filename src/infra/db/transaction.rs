//! Transaction handle shared between several owners.

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tokio::sync::{RwLock, RwLockReadGuard};

/// One open transaction that repositories, handlers and tests can all
/// query through.
///
/// Queries share a read lock. [`commit_and_continue`](Self::commit_and_continue)
/// and [`rollback`](Self::rollback) wait for the write lock, so they must not
/// be awaited while the same task still holds a guard from
/// [`read`](Self::read).
#[derive(Clone)]
pub struct SharedTransaction {
    inner: Arc<RwLock<Option<DatabaseTransaction>>>,
}

impl SharedTransaction {
    /// Begin a transaction on `connection`.
    pub async fn begin(connection: &DatabaseConnection) -> Result<Self, DbErr> {
        let transaction = connection.begin().await?;
        Ok(Self {
            inner: Arc::new(RwLock::new(Some(transaction))),
        })
    }

    /// Borrow the open transaction.
    pub async fn read(&self) -> Result<RwLockReadGuard<'_, DatabaseTransaction>, DbErr> {
        let guard = self.inner.read().await;
        RwLockReadGuard::try_map(guard, |slot| slot.as_ref()).map_err(|_| finished())
    }

    /// Commit the current transaction and carry on in a new one from
    /// `connection`. Every clone sees the new transaction.
    pub async fn commit_and_continue(&self, connection: &DatabaseConnection) -> Result<(), DbErr> {
        let mut slot = self.inner.write().await;
        if slot.is_none() {
            return Err(finished());
        }

        let next = connection.begin().await?;
        match slot.replace(next) {
            Some(done) => done.commit().await,
            None => Err(finished()),
        }
    }

    /// Roll back and close the transaction for every clone.
    pub async fn rollback(&self) -> Result<(), DbErr> {
        let transaction = self.inner.write().await.take().ok_or_else(finished)?;
        transaction.rollback().await
    }
}

fn finished() -> DbErr {
    DbErr::Custom("transaction already finished".to_string())
}
