//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Settings;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, settings: Settings) -> AppResult<()> {
    tracing::info!(profile = %settings.profile, "Starting server...");

    tokio::fs::create_dir_all(&settings.upload_folder)
        .await
        .map_err(|e| {
            AppError::internal(format!(
                "Failed to create upload folder {}: {}",
                settings.upload_folder.display(),
                e
            ))
        })?;

    let database = Database::connect(&settings).await?;
    database.create_schema().await?;

    let host = args.host.unwrap_or_else(|| settings.server_host.clone());
    let port = args.port.unwrap_or(settings.server_port);
    let app = create_router(AppState::from_settings(database, Arc::new(settings)));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
