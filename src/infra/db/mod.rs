//! Database connection and schema lifecycle.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};

use crate::config::{Settings, DEFAULT_MAX_CONNECTIONS};

pub mod schema;
mod transaction;

pub use transaction::SharedTransaction;

/// Pool size for SQLite. In-memory databases vanish with their last
/// connection, so at least one stays open.
const SQLITE_MAX_CONNECTIONS: u32 = 4;

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect using the settings' database URL.
    ///
    /// Statement logging follows `Settings::database_echo`.
    pub async fn connect(settings: &Settings) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(settings.database_url.clone());
        options.sqlx_logging(settings.database_echo);

        if is_sqlite(&settings.database_url) {
            options.max_connections(SQLITE_MAX_CONNECTIONS).min_connections(1);
        } else {
            options.max_connections(DEFAULT_MAX_CONNECTIONS);
        }

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!(backend = ?connection.get_database_backend(), "Database connected");

        Ok(Self { connection })
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Get a clone of the database connection.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Create all application tables.
    pub async fn create_schema(&self) -> Result<(), DbErr> {
        schema::create_all(&self.connection).await
    }

    /// Drop all application tables.
    pub async fn drop_schema(&self) -> Result<(), DbErr> {
        schema::drop_all(&self.connection).await
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close the pool.
    pub async fn close(self) -> Result<(), DbErr> {
        self.connection.close().await
    }
}

fn is_sqlite(url: &str) -> bool {
    url.starts_with("sqlite:")
}
