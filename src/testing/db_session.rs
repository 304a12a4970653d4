//! Transaction-scoped database handle for a single test.

use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr};
use tokio::sync::RwLockReadGuard;

use crate::infra::{SharedTransaction, TxUserRepository};

/// One open transaction on the session's database.
///
/// The per-test application runs its queries in this same transaction, so
/// uncommitted rows are visible to requests and no request waits on a lock
/// the test holds. Work is discarded by [`rollback`](Self::rollback) unless
/// it was committed first. Borrows the session, so the schema cannot be
/// torn down while a transaction is still open.
pub struct DbSession<'s> {
    connection: &'s DatabaseConnection,
    transaction: SharedTransaction,
}

impl<'s> DbSession<'s> {
    pub(crate) async fn begin(connection: &'s DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self {
            connection,
            transaction: SharedTransaction::begin(connection).await?,
        })
    }

    pub(crate) fn shared(&self) -> SharedTransaction {
        self.transaction.clone()
    }

    /// The open transaction, for ad hoc queries.
    ///
    /// Drop the guard before calling [`commit`](Self::commit).
    pub async fn transaction(&self) -> Result<RwLockReadGuard<'_, DatabaseTransaction>, DbErr> {
        self.transaction.read().await
    }

    /// Users as seen from inside this transaction.
    pub fn users(&self) -> TxUserRepository {
        TxUserRepository::new(self.shared())
    }

    /// Make pending work visible to other connections and continue in a
    /// new transaction.
    pub async fn commit(&mut self) -> Result<(), DbErr> {
        self.transaction.commit_and_continue(self.connection).await
    }

    /// Discard uncommitted work.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.transaction.rollback().await
    }
}
