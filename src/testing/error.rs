use axum::http::StatusCode;
use thiserror::Error;

use crate::errors::{AppError, ConfigError};

/// Failure while setting up or driving a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("application error: {0}")]
    App(#[from] AppError),

    #[error("http error: {0}")]
    Http(String),

    #[error("login failed with status {status}: {body}")]
    Login { status: StatusCode, body: String },

    #[error("login response did not include an access token")]
    MissingToken,

    #[error("could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FixtureError {
    pub(crate) fn http(err: impl std::fmt::Display) -> Self {
        FixtureError::Http(err.to_string())
    }
}
