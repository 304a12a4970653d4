//! Application-wide constants
//!
//! Centralized location for magic values and configuration defaults.

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_SECRET_KEY: &str = "SECRET_KEY";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_DATABASE_ECHO: &str = "DATABASE_ECHO";
pub const ENV_JWT_SECRET_KEY: &str = "JWT_SECRET_KEY";
pub const ENV_JWT_ACCESS_TOKEN_EXPIRES: &str = "JWT_ACCESS_TOKEN_EXPIRES";
pub const ENV_UPLOAD_FOLDER: &str = "UPLOAD_FOLDER";
pub const ENV_MAX_CONTENT_LENGTH: &str = "MAX_CONTENT_LENGTH";
pub const ENV_ALLOWED_IMAGE_EXTENSIONS: &str = "ALLOWED_IMAGE_EXTENSIONS";
pub const ENV_ALLOWED_VIDEO_EXTENSIONS: &str = "ALLOWED_VIDEO_EXTENSIONS";
pub const ENV_REPORTS_PER_PAGE: &str = "REPORTS_PER_PAGE";
pub const ENV_CORS_ORIGINS: &str = "CORS_ORIGINS";
pub const ENV_SERVER_HOST: &str = "SERVER_HOST";
pub const ENV_SERVER_PORT: &str = "SERVER_PORT";

/// Selects the active profile for the CLI
pub const ENV_APP_ENV: &str = "APP_ENV";

// =============================================================================
// Secrets
// =============================================================================

/// Session signing key used when `SECRET_KEY` is unset
pub const DEFAULT_SECRET_KEY: &str = "dev-secret-key-change-in-production";

/// JWT signing key used when `JWT_SECRET_KEY` is unset
pub const DEFAULT_JWT_SECRET_KEY: &str = "jwt-secret-key-change-in-production";

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (local SQLite file)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://ajali.db?mode=rwc";

/// Database used by the testing profile. Not overridable from the environment.
pub const TESTING_DATABASE_URL: &str = "postgresql://localhost/ajali_test_db";

/// Connection pool ceiling
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default access token lifetime in seconds (1 hour)
pub const DEFAULT_JWT_ACCESS_TOKEN_EXPIRES_SECS: u64 = 3600;

/// Longest access token lifetime accepted from the environment (10 years)
pub const MAX_JWT_ACCESS_TOKEN_EXPIRES_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Access token lifetime in seconds under the testing profile
pub const TESTING_JWT_ACCESS_TOKEN_EXPIRES_SECS: u64 = 300;

/// Header carrying the access token
pub const JWT_HEADER_NAME: &str = "Authorization";

/// Scheme preceding the token in the header value
pub const JWT_HEADER_TYPE: &str = "Bearer";

/// JWT token type identifier returned to clients
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// File Upload
// =============================================================================

pub const DEFAULT_UPLOAD_FOLDER: &str = "uploads";

/// 16 MiB
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 16 * 1024 * 1024;

pub const DEFAULT_ALLOWED_IMAGE_EXTENSIONS: &str = "jpg,jpeg,png,gif";

pub const DEFAULT_ALLOWED_VIDEO_EXTENSIONS: &str = "mp4,avi,mov,wmv";

// =============================================================================
// Pagination
// =============================================================================

/// Default number of reports per page
pub const DEFAULT_REPORTS_PER_PAGE: u64 = 20;

// =============================================================================
// CORS
// =============================================================================

pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:3000,http://localhost:5173,http://localhost:8080";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 5000;

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Reports
// =============================================================================

/// Status assigned to newly filed reports
pub const REPORT_STATUS_PENDING: &str = "pending";
