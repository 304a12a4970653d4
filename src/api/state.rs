//! Shared state handed to every handler.

use std::sync::Arc;

use crate::config::Settings;
use crate::infra::{Database, UserStore};
use crate::services::{AuthService, Authenticator};

/// Application state (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Resolved configuration
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire the default services over a connected database.
    pub fn from_settings(database: Database, settings: Arc<Settings>) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let auth_service = Arc::new(Authenticator::new(users, settings.clone()));

        Self::new(auth_service, Arc::new(database), settings)
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        database: Arc<Database>,
        settings: Arc<Settings>,
    ) -> Self {
        Self {
            auth_service,
            database,
            settings,
        }
    }
}
