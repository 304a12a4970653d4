//! Schema command - creates or drops the application tables.

use crate::cli::args::{SchemaAction, SchemaArgs};
use crate::config::Settings;
use crate::errors::AppResult;
use crate::infra::Database;

/// Execute the schema command
pub async fn execute(args: SchemaArgs, settings: Settings) -> AppResult<()> {
    let db = Database::connect(&settings).await?;

    match args.action {
        SchemaAction::Create => {
            db.create_schema().await?;
            tracing::info!("Schema created");
        }
        SchemaAction::Drop => {
            tracing::warn!("Dropping all tables...");
            db.drop_schema().await?;
            tracing::info!("Schema dropped");
        }
        SchemaAction::Reset => {
            tracing::warn!("Dropping and recreating all tables...");
            db.drop_schema().await?;
            db.create_schema().await?;
            tracing::info!("Schema reset");
        }
    }

    db.close().await?;
    Ok(())
}
