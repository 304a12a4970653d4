//! Application settings resolved from a profile and the environment.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::constants::*;
use super::env::{EnvReader, EnvSource, ProcessEnv};
use super::profile::Profile;
use crate::domain::MediaKind;
use crate::errors::ConfigError;

/// Where the API accepts access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLocation {
    Headers,
}

/// Immutable application settings.
///
/// Built once per process with [`Settings::load`] or [`Settings::resolve`]
/// and shared by reference afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub profile: Profile,
    secret_key: String,

    // Database
    pub database_url: String,
    pub database_echo: bool,
    pub debug: bool,
    pub testing: bool,

    // JWT
    jwt_secret_key: String,
    pub jwt_access_token_expires: Duration,
    pub jwt_token_location: TokenLocation,
    pub jwt_header_name: String,
    pub jwt_header_type: String,

    // File upload
    pub upload_folder: PathBuf,
    pub max_content_length: usize,
    pub allowed_image_extensions: BTreeSet<String>,
    pub allowed_video_extensions: BTreeSet<String>,

    // Pagination
    pub reports_per_page: u64,

    // CORS
    pub cors_origins: Vec<String>,

    // Server
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("profile", &self.profile)
            .field("secret_key", &"[REDACTED]")
            .field("database_url", &"[REDACTED]")
            .field("database_echo", &self.database_echo)
            .field("debug", &self.debug)
            .field("testing", &self.testing)
            .field("jwt_secret_key", &"[REDACTED]")
            .field("jwt_access_token_expires", &self.jwt_access_token_expires)
            .field("jwt_token_location", &self.jwt_token_location)
            .field("jwt_header_name", &self.jwt_header_name)
            .field("jwt_header_type", &self.jwt_header_type)
            .field("upload_folder", &self.upload_folder)
            .field("max_content_length", &self.max_content_length)
            .field("allowed_image_extensions", &self.allowed_image_extensions)
            .field("allowed_video_extensions", &self.allowed_video_extensions)
            .field("reports_per_page", &self.reports_per_page)
            .field("cors_origins", &self.cors_origins)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Settings {
    /// Load settings for `profile` from `.env` (if present) and the process environment.
    pub fn load(profile: Profile) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::resolve(profile, &ProcessEnv)
    }

    /// Resolve settings for `profile` against an arbitrary environment source.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] when a numeric, duration or boolean
    /// variable is present but cannot be parsed.
    pub fn resolve<E: EnvSource + ?Sized>(profile: Profile, env: &E) -> Result<Self, ConfigError> {
        let settings = Self::base(profile, env)?.apply_overrides();
        tracing::debug!(profile = %settings.profile, "Settings resolved");
        Ok(settings)
    }

    fn base<E: EnvSource + ?Sized>(profile: Profile, env: &E) -> Result<Self, ConfigError> {
        let env = EnvReader::new(env);

        Ok(Self {
            profile,
            secret_key: env.string(ENV_SECRET_KEY, DEFAULT_SECRET_KEY),
            database_url: env.string(ENV_DATABASE_URL, DEFAULT_DATABASE_URL),
            database_echo: env.flag(ENV_DATABASE_ECHO, false)?,
            debug: false,
            testing: false,
            jwt_secret_key: env.string(ENV_JWT_SECRET_KEY, DEFAULT_JWT_SECRET_KEY),
            jwt_access_token_expires: env.seconds(
                ENV_JWT_ACCESS_TOKEN_EXPIRES,
                DEFAULT_JWT_ACCESS_TOKEN_EXPIRES_SECS,
                MAX_JWT_ACCESS_TOKEN_EXPIRES_SECS,
            )?,
            jwt_token_location: TokenLocation::Headers,
            jwt_header_name: JWT_HEADER_NAME.to_string(),
            jwt_header_type: JWT_HEADER_TYPE.to_string(),
            upload_folder: PathBuf::from(env.string(ENV_UPLOAD_FOLDER, DEFAULT_UPLOAD_FOLDER)),
            max_content_length: env.number(ENV_MAX_CONTENT_LENGTH, DEFAULT_MAX_CONTENT_LENGTH)?,
            allowed_image_extensions: env.set(
                ENV_ALLOWED_IMAGE_EXTENSIONS,
                DEFAULT_ALLOWED_IMAGE_EXTENSIONS,
            ),
            allowed_video_extensions: env.set(
                ENV_ALLOWED_VIDEO_EXTENSIONS,
                DEFAULT_ALLOWED_VIDEO_EXTENSIONS,
            ),
            reports_per_page: env.number(ENV_REPORTS_PER_PAGE, DEFAULT_REPORTS_PER_PAGE)?,
            cors_origins: env.list(ENV_CORS_ORIGINS, DEFAULT_CORS_ORIGINS),
            server_host: env.string(ENV_SERVER_HOST, DEFAULT_SERVER_HOST),
            server_port: env.number(ENV_SERVER_PORT, DEFAULT_SERVER_PORT)?,
        })
    }

    fn apply_overrides(mut self) -> Self {
        let overrides = self.profile.overrides();

        if let Some(debug) = overrides.debug {
            self.debug = debug;
        }
        if let Some(echo) = overrides.database_echo {
            self.database_echo = echo;
        }
        if let Some(testing) = overrides.testing {
            self.testing = testing;
        }
        if let Some(url) = overrides.database_url {
            self.database_url = url.to_string();
        }
        if let Some(expires) = overrides.jwt_access_token_expires {
            self.jwt_access_token_expires = expires;
        }

        self
    }

    /// Copy of these settings pointed at another database.
    ///
    /// Used by the test harness to run against throwaway databases.
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Session signing key.
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret_key.as_bytes()
    }

    /// Token lifetime in whole seconds.
    pub fn jwt_expires_in_secs(&self) -> i64 {
        i64::try_from(self.jwt_access_token_expires.as_secs()).unwrap_or(i64::MAX)
    }

    /// Prefix expected before the token in the auth header, e.g. `"Bearer "`.
    pub fn bearer_prefix(&self) -> String {
        format!("{} ", self.jwt_header_type)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Classify an uploaded file by its extension.
    pub fn media_kind(&self, filename: &str) -> Option<MediaKind> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        if self.allowed_image_extensions.contains(&extension) {
            Some(MediaKind::Image)
        } else if self.allowed_video_extensions.contains(&extension) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }

    /// True when production runs with the built-in development secrets.
    pub fn has_insecure_secrets(&self) -> bool {
        self.profile == Profile::Production && self.uses_default_secrets()
    }

    fn uses_default_secrets(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY || self.jwt_secret_key == DEFAULT_JWT_SECRET_KEY
    }
}
