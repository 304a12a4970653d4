//! Entity-first schema management.
//!
//! Tables are created straight from the SeaORM entities, users before
//! reports, and dropped in the reverse order.

use sea_orm::sea_query::{Table, TableCreateStatement, TableDropStatement};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, Schema};

use crate::infra::repositories::entities::{ReportEntity, UserEntity};

/// Tables owned by the application, in creation order.
pub const TABLES: [&str; 2] = ["users", "reports"];

/// Create every table that does not exist yet.
pub async fn create_all<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    let statements = [
        create_statement(&schema, UserEntity),
        create_statement(&schema, ReportEntity),
    ];

    for statement in &statements {
        conn.execute(backend.build(statement)).await?;
    }

    tracing::debug!(tables = ?TABLES, "Schema created");
    Ok(())
}

/// Drop every application table that exists.
pub async fn drop_all<C: ConnectionTrait>(conn: &C) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();

    let statements = [drop_statement(ReportEntity), drop_statement(UserEntity)];

    for statement in &statements {
        conn.execute(backend.build(statement)).await?;
    }

    tracing::debug!(tables = ?TABLES, "Schema dropped");
    Ok(())
}

fn create_statement<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    statement
}

fn drop_statement<E: EntityTrait>(entity: E) -> TableDropStatement {
    Table::drop().table(entity).if_exists().to_owned()
}
